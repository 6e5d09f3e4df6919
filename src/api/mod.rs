// src/api/mod.rs
//! Notion block API interaction: the ability to retrieve block content.
//!
//! Traversal logic depends on [`BlockRepository`], never on HTTP details;
//! [`NotionHttpClient`] is the production implementation.

pub mod client;
pub mod pagination;
pub mod parser;
pub mod tree;
mod types;

use crate::error::NotionError;
use crate::model::Block;
use crate::types::BlockId;

/// The ability to read blocks from a Notion workspace.
#[async_trait::async_trait]
pub trait BlockRepository: Send + Sync {
    /// `GET /blocks/{id}`
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, NotionError>;

    /// One page of `GET /blocks/{id}/children`. `page_size: None` leaves the
    /// size to the server.
    async fn list_children(
        &self,
        id: &BlockId,
        cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<PaginatedResponse<Block>, NotionError>;
}

#[async_trait::async_trait]
impl<R> BlockRepository for std::sync::Arc<R>
where
    R: BlockRepository + ?Sized,
{
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, NotionError> {
        (**self).retrieve_block(id).await
    }

    async fn list_children(
        &self,
        id: &BlockId,
        cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<PaginatedResponse<Block>, NotionError> {
        (**self).list_children(id, cursor, page_size).await
    }
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use pagination::{fetch_all_children, fetch_all_pages};
pub use tree::{hydrate_table, BlockTreeWalker, WalkOptions};
pub use types::{AppendBlockChildrenRequest, BlockUpdate, NotionApiErrorResponse, PaginatedResponse};
