// src/constants.rs
//! Domain constants that define the operational boundaries of the client.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Default root of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects are requested per page when listing children.
///
/// The Notion API maximum is 100. Using it minimizes round-trips while
/// walking a block tree.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Traversal boundaries
// ---------------------------------------------------------------------------

/// Upper bound on concurrently descended siblings during a tree walk.
pub const MAX_WALK_CONCURRENCY: usize = 32;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
