// src/lib.rs
//! notion-blocks library: a typed client for the Notion block API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `NotionError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `ClientConfig`, `CliConfig`
//! - **Block model**: `Block`, `BlockKind`, payload structs
//! - **Domain types**: `BlockId`, `PageId`, `ApiKey`, `RichText`, etc.
//! - **API client**: `NotionHttpClient`, `BlockRepository`, `BlockTreeWalker`

mod api;
mod config;
mod constants;
mod error;
mod model;
mod types;

// --- Error Handling ---
pub use crate::error::{BlockAction, ErrorKind, NotionError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CliConfig, ClientConfig, CommandLineInput, FetchMode};
pub use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_WALK_CONCURRENCY, NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE,
    NOTION_API_VERSION,
};

// --- Block Model ---
pub use crate::model::{Block, BlockCommon, BlockKind, Parent};

// --- Block Payloads ---
pub use crate::model::blocks::{
    BookmarkBlock, CalloutBlock, ChildDatabaseBlock, ChildPageBlock, CodeBlock, EmbedBlock,
    EmptyBlock, EquationBlock, ExternalFile, FileBlock, FileObject, HeadingBlock, HostedFile, Icon,
    LayoutBlock, LinkPreviewBlock, LinkToPage, SyncedBlock, SyncedFrom, TableBlock,
    TableOfContentsBlock, TableRowBlock, TemplateBlock, TextBlock, ToDoBlock, UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    plain_text, Annotations, ApiBaseUrl, ApiKey, BlockId, Color, DatabaseId, DateRange,
    EquationContent, Id, Link, Mention, ObjectRef, PageId, PartialUser, RichText, RichTextContent,
    TemplateMention, TextContent, UserId,
};

// --- API Client ---
pub use crate::api::{
    client::{extract_response_text, ApiResponse},
    fetch_all_children, fetch_all_pages, hydrate_table,
    parser::{parse_api_response, parse_block_response, parse_blocks_pagination},
    AppendBlockChildrenRequest, BlockRepository, BlockTreeWalker, BlockUpdate,
    NotionApiErrorResponse, NotionHttpClient, PaginatedResponse, WalkOptions,
};
