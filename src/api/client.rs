// src/api/client.rs
//! HTTP transport for the Notion block endpoints.
//!
//! This module is a thin wrapper around reqwest: it builds URLs, attaches
//! authentication, sends requests and hands the raw body to
//! [`super::parser`]. Traversal logic lives in [`super::tree`].

use super::parser;
use super::types::{AppendBlockChildrenRequest, BlockUpdate, PaginatedResponse};
use super::BlockRepository;
use crate::config::ClientConfig;
use crate::error::{BlockAction, NotionError};
use crate::model::Block;
use crate::types::{ApiKey, BlockId};
use reqwest::{header, Client, Method, Response};
use serde::Serialize;
use url::Url;

/// A thin wrapper around reqwest Client for Notion API requests.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    config: ClientConfig,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, config: ClientConfig) -> Result<Self, NotionError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key, &config.notion_version)?)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey, version: &str) -> Result<header::HeaderMap, NotionError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                NotionError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(version).map_err(|e| {
                NotionError::MissingConfiguration(format!("Invalid Notion-Version: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Joins path segments onto the configured base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        self.config.base_url.join(segments)
    }

    fn children_url(&self, id: &BlockId, cursor: Option<&str>, page_size: Option<u32>) -> Url {
        let mut url = self.endpoint(&["blocks", id.as_str(), "children"]);
        if cursor.is_some() || page_size.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(cursor) = cursor {
                query.append_pair("start_cursor", cursor);
            }
            if let Some(page_size) = page_size {
                query.append_pair("page_size", &page_size.to_string());
            }
        }
        url
    }

    /// Sends one request, with an optional JSON body.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, NotionError> {
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(NotionError::Encode)?;
            request = request.body(encoded);
        }

        let response = request.send().await?;
        log::debug!("{} answered {}", response.url(), response.status());
        Ok(response)
    }

    /// Makes a GET request to the specified URL.
    pub async fn get(&self, url: Url) -> Result<Response, NotionError> {
        self.send::<()>(Method::GET, url, None).await
    }

    /// Makes a PATCH request with JSON body to the specified URL.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<Response, NotionError> {
        self.send(Method::PATCH, url, Some(body)).await
    }

    /// Makes a DELETE request to the specified URL.
    pub async fn delete(&self, url: Url) -> Result<Response, NotionError> {
        self.send::<()>(Method::DELETE, url, None).await
    }

    /// Appends `request.children` to the container `id`. Returns the created
    /// blocks.
    pub async fn append_block_children(
        &self,
        id: &BlockId,
        request: &AppendBlockChildrenRequest,
    ) -> Result<PaginatedResponse<Block>, NotionError> {
        let result: Result<PaginatedResponse<Block>, NotionError> = async {
            let url = self.endpoint(&["blocks", id.as_str(), "children"]);
            let response = self.patch(url, request).await?;
            parser::parse_blocks_pagination(extract_response_text(response).await?)
        }
        .await;
        result.map_err(|e| e.in_block(id, BlockAction::AppendChildren))
    }

    /// Replaces a block's payload and/or toggles its archived flag.
    pub async fn update_block(&self, id: &BlockId, update: &BlockUpdate) -> Result<Block, NotionError> {
        let result: Result<Block, NotionError> = async {
            let url = self.endpoint(&["blocks", id.as_str()]);
            let response = self.patch(url, update).await?;
            parser::parse_block_response(extract_response_text(response).await?)
        }
        .await;
        result.map_err(|e| e.in_block(id, BlockAction::Update))
    }

    /// Archives a block. The API answers with the archived block.
    pub async fn delete_block(&self, id: &BlockId) -> Result<Block, NotionError> {
        let result: Result<Block, NotionError> = async {
            let url = self.endpoint(&["blocks", id.as_str()]);
            let response = self.delete(url).await?;
            parser::parse_block_response(extract_response_text(response).await?)
        }
        .await;
        result.map_err(|e| e.in_block(id, BlockAction::Delete))
    }
}

#[async_trait::async_trait]
impl BlockRepository for NotionHttpClient {
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, NotionError> {
        let url = self.endpoint(&["blocks", id.as_str()]);
        let response = self.get(url).await?;
        let result = extract_response_text(response).await?;
        parser::parse_block_response(result)
    }

    async fn list_children(
        &self,
        id: &BlockId,
        cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<PaginatedResponse<Block>, NotionError> {
        let url = self.children_url(id, cursor, page_size);
        let response = self.get(url).await?;
        let result = extract_response_text(response).await?;
        parser::parse_blocks_pagination(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, NotionError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base_url: &str) -> NotionHttpClient {
        let key = ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap();
        let config = ClientConfig::default().with_base_url(base_url).unwrap();
        NotionHttpClient::new(&key, config).unwrap()
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let client = client("https://api.notion.com/v1");
        let id = BlockId::new("b-1");

        assert_eq!(
            client.endpoint(&["blocks", id.as_str()]).as_str(),
            "https://api.notion.com/v1/blocks/b-1"
        );

        let with_slash = self::client("http://localhost:8080/v1/");
        assert_eq!(
            with_slash.endpoint(&["blocks", "b-1", "children"]).as_str(),
            "http://localhost:8080/v1/blocks/b-1/children"
        );
    }

    #[test]
    fn children_url_carries_cursor_and_page_size() {
        let client = client("https://api.notion.com/v1");
        let id = BlockId::new("b-1");

        assert_eq!(
            client.children_url(&id, None, None).as_str(),
            "https://api.notion.com/v1/blocks/b-1/children"
        );
        assert_eq!(
            client.children_url(&id, Some("c2 ="), Some(100)).as_str(),
            "https://api.notion.com/v1/blocks/b-1/children?start_cursor=c2+%3D&page_size=100"
        );
    }

    #[test]
    fn headers_authenticate_and_pin_the_version() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap();
        let headers = NotionHttpClient::create_headers(&key, "2022-06-28").unwrap();

        assert_eq!(
            headers[header::AUTHORIZATION],
            "Bearer secret_abcdefghijklmnopqrstuvwxyz"
        );
        assert_eq!(headers["Notion-Version"], "2022-06-28");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn rejects_unencodable_version() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap();
        assert!(NotionHttpClient::create_headers(&key, "bad\nversion").is_err());
    }
}
