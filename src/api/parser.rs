// src/api/parser.rs
//! Turns raw HTTP responses into typed results or typed API errors.

use super::client::ApiResponse;
use super::types::{NotionApiErrorResponse, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{NotionError, NotionErrorCode};
use crate::model::Block;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Parse any Notion API response: success bodies decode into `T`, everything
/// else becomes [`NotionError::Api`].
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, NotionError>
where
    T: DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, NotionError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionError::Decode {
            url: url.to_string(),
            source: e,
            body: preview(body),
        }
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> NotionError {
    match serde_json::from_str::<NotionApiErrorResponse>(body) {
        Ok(envelope) => {
            log::debug!(
                "{} answered {} ({}): {}",
                url,
                status,
                envelope.code,
                envelope.message
            );
            NotionError::Api {
                status: envelope.status.unwrap_or(status.as_u16()),
                code: NotionErrorCode::from_api_response(&envelope.code),
                message: envelope.message,
                request_id: envelope.request_id,
            }
        }
        // Not a Notion envelope (proxy page, empty body): keep the status only
        Err(_) => NotionError::Api {
            status: status.as_u16(),
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {} from {}", status, url),
            request_id: None,
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

pub fn parse_block_response(result: ApiResponse<String>) -> Result<Block, NotionError> {
    parse_api_response(result)
}

pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, NotionError> {
    parse_api_response(result)
}
