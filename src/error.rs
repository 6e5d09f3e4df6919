// src/error.rs
//! Error types with structured error handling.
//!
//! Every failure in the client is a [`NotionError`]. Failures deep inside a
//! traversal are wrapped in [`NotionError::Block`] so the caller learns which
//! block or container was being processed, while `source()` keeps the
//! original error available for inspection.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request URL is not valid
    InvalidRequestUrl,
    /// Request is not supported
    InvalidRequest,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// The Notion-Version header is missing
    MissingVersion,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "invalid_request_url" => Self::InvalidRequestUrl,
            "invalid_request" => Self::InvalidRequest,
            "validation_error" => Self::ValidationFailed,
            "missing_version" => Self::MissingVersion,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient. The client never retries on its
    /// own; callers may use this to decide.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::InvalidRequestUrl => write!(f, "invalid_request_url"),
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::MissingVersion => write!(f, "missing_version"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// The step that was running when a block-scoped failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    Retrieve,
    ListChildren,
    HydrateTable,
    ExpandChildren,
    AppendChildren,
    Update,
    Delete,
}

impl fmt::Display for BlockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Retrieve => "retrieve block",
            Self::ListChildren => "list children of",
            Self::HydrateTable => "fetch table rows of",
            Self::ExpandChildren => "expand children of",
            Self::AppendChildren => "append children to",
            Self::Update => "update block",
            Self::Delete => "delete block",
        };
        f.write_str(text)
    }
}

/// Broad classification of a [`NotionError`], looking through context
/// wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or a non-success HTTP status
    Transport,
    /// A response body that does not match the expected shape
    Decode,
    /// The API broke one of its own contracts (e.g. a missing cursor)
    Contract,
    /// Bad local input: configuration, IDs, files
    Configuration,
}

/// Main error type.
#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}, HTTP {status}): {message}")]
    Api {
        status: u16,
        code: NotionErrorCode,
        message: String,
        request_id: Option<String>,
    },

    #[error("Malformed response from {url}: {source}\nBody: {body}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Pagination of {container} reported more results without a cursor")]
    MissingCursor { container: String },

    #[error("Cannot {action} a {block_type} block that has no ID")]
    MissingBlockId {
        action: BlockAction,
        block_type: String,
    },

    #[error("Failed to {action} {block_id}: {source}")]
    Block {
        block_id: String,
        action: BlockAction,
        #[source]
        source: Box<NotionError>,
    },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl NotionError {
    /// Wraps `self` with the block (or container) ID and step that failed.
    pub fn in_block(self, block_id: impl fmt::Display, action: BlockAction) -> Self {
        NotionError::Block {
            block_id: block_id.to_string(),
            action,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all block context removed.
    pub fn root_cause(&self) -> &NotionError {
        match self {
            NotionError::Block { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NotionError::Block { source, .. } => source.kind(),
            NotionError::NetworkFailure(_) | NotionError::Api { .. } => ErrorKind::Transport,
            NotionError::Decode { .. } => ErrorKind::Decode,
            NotionError::MissingCursor { .. } | NotionError::MissingBlockId { .. } => {
                ErrorKind::Contract
            }
            NotionError::MissingConfiguration(_)
            | NotionError::Encode(_)
            | NotionError::Io(_)
            | NotionError::Validation(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status of the failed request, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self.root_cause() {
            NotionError::Api { status, .. } => Some(*status),
            NotionError::NetworkFailure(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The upstream error code, when the server sent one.
    pub fn api_code(&self) -> Option<&NotionErrorCode> {
        match self.root_cause() {
            NotionError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = NotionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> NotionError {
        NotionError::Api {
            status: 404,
            code: NotionErrorCode::from_api_response("object_not_found"),
            message: "Could not find block with ID: t-1".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in ["rate_limited", "object_not_found", "validation_error", "brand_new"] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(NotionErrorCode::from_http_status(502).to_string(), "http_502");
    }

    #[test]
    fn block_context_is_preserved_and_classified() {
        let error = not_found()
            .in_block("t-1", BlockAction::HydrateTable)
            .in_block("page-1", BlockAction::ListChildren);

        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), Some(404));
        assert!(error.api_code().is_some_and(NotionErrorCode::is_not_found));

        let message = error.to_string();
        assert!(message.starts_with("Failed to list children of page-1"), "{}", message);
        assert!(message.contains("fetch table rows of t-1"), "{}", message);

        let source = std::error::Error::source(&error).expect("wrapped source");
        assert!(source.to_string().contains("t-1"));
    }

    #[test]
    fn contract_violations_have_their_own_kind() {
        let error = NotionError::MissingCursor {
            container: "page-1".into(),
        };
        assert_eq!(error.kind(), ErrorKind::Contract);
        assert_eq!(error.status(), None);
    }
}
