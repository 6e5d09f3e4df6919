// src/api/tree.rs
//! Recursive retrieval of block trees.
//!
//! Two rules drive every traversal:
//!
//! * **Table hydration.** A table's rows are not part of the block returned
//!   by the API; they are the children of the table and must be listed with a
//!   separate call keyed on the table's own ID. [`hydrate_table`] performs that
//!   call and overwrites whatever the table carried before.
//! * **Uniform descent.** Every container variant is descended through
//!   [`Block::children_mut`], pre-order and depth-first, so no variant can be
//!   forgotten by the walker.

use super::pagination::fetch_all_children;
use super::BlockRepository;
use crate::constants::MAX_WALK_CONCURRENCY;
use crate::error::{BlockAction, NotionError};
use crate::model::{Block, BlockKind};
use crate::types::BlockId;
use futures::future::BoxFuture;
use futures::{stream, FutureExt, StreamExt, TryStreamExt};

/// How a traversal descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// List the children of containers that report `has_children` but arrived
    /// with an empty child list.
    pub expand_nested: bool,
    /// How many siblings are descended at once. Output order never depends
    /// on this.
    pub concurrency: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            expand_nested: false,
            concurrency: 1,
        }
    }
}

impl WalkOptions {
    pub fn expanded(mut self) -> Self {
        self.expand_nested = true;
        self
    }

    /// Sets the sibling window, clamped to `1..=MAX_WALK_CONCURRENCY`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_WALK_CONCURRENCY);
        self
    }
}

/// Attaches a table's rows, fetched through the table's own ID.
///
/// Any other variant is returned untouched without a call. Rows already
/// present on the table are replaced, never merged.
pub async fn hydrate_table<R>(repository: &R, mut block: Block) -> Result<Block, NotionError>
where
    R: BlockRepository + ?Sized,
{
    if let BlockKind::Table(table) = &mut block.kind {
        let id = block.common.id.as_ref().ok_or(NotionError::MissingBlockId {
            action: BlockAction::HydrateTable,
            block_type: "table".to_string(),
        })?;

        let rows = fetch_all_children(repository, id)
            .await
            .map_err(|e| e.in_block(id, BlockAction::HydrateTable))?;

        log::debug!("Hydrated table {} with {} rows", id, rows.len());
        table.children = rows;
    }
    Ok(block)
}

/// Walks block trees through a [`BlockRepository`].
///
/// The walker only borrows the repository, so any number of walkers can
/// share one client.
pub struct BlockTreeWalker<'a, R: ?Sized> {
    repository: &'a R,
    options: WalkOptions,
}

impl<'a, R> BlockTreeWalker<'a, R>
where
    R: BlockRepository + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        Self::with_options(repository, WalkOptions::default())
    }

    pub fn with_options(repository: &'a R, options: WalkOptions) -> Self {
        let options = WalkOptions {
            concurrency: options.concurrency.clamp(1, MAX_WALK_CONCURRENCY),
            ..options
        };
        Self {
            repository,
            options,
        }
    }

    pub fn options(&self) -> WalkOptions {
        self.options
    }

    /// Retrieves a single block. Tables come back without rows.
    pub async fn get_block(&self, id: &BlockId) -> Result<Block, NotionError> {
        self.repository
            .retrieve_block(id)
            .await
            .map_err(|e| e.in_block(id, BlockAction::Retrieve))
    }

    /// Retrieves a block and, when it is a table, its rows. Nothing deeper.
    pub async fn get_block_with_children(&self, id: &BlockId) -> Result<Block, NotionError> {
        let block = self.get_block(id).await?;
        hydrate_table(self.repository, block).await
    }

    /// Lists the direct children of a container, following every cursor.
    /// Nested tables are not hydrated.
    pub async fn get_all_block_children(&self, id: &BlockId) -> Result<Vec<Block>, NotionError> {
        fetch_all_children(self.repository, id)
            .await
            .map_err(|e| e.in_block(id, BlockAction::ListChildren))
    }

    /// Same as [`BlockTreeWalker::fetch_children_deep`].
    pub async fn get_block_children_with_tables(
        &self,
        id: &BlockId,
    ) -> Result<Vec<Block>, NotionError> {
        self.fetch_children_deep(id).await
    }

    /// Lists the children of `id`, then descends into every one of them:
    /// tables are hydrated and every child list already present is walked.
    ///
    /// With [`WalkOptions::expand_nested`] set, containers that report
    /// children they did not carry are listed as well.
    pub async fn fetch_children_deep(&self, id: &BlockId) -> Result<Vec<Block>, NotionError> {
        log::info!(
            "Walking children of {} (expand_nested: {}, concurrency: {})",
            id,
            self.options.expand_nested,
            self.options.concurrency
        );

        let children = self.get_all_block_children(id).await?;
        let children = self.descend_all(children).await?;

        log::info!(
            "Walked {}: {} top-level blocks, {} in total",
            id,
            children.len(),
            children.iter().map(Block::subtree_len).sum::<usize>()
        );
        Ok(children)
    }

    /// The fully materialised content of `id`: every nested level is listed
    /// and every table hydrated, regardless of this walker's options.
    pub async fn get_block_tree(&self, id: &BlockId) -> Result<Vec<Block>, NotionError> {
        let walker = BlockTreeWalker {
            repository: self.repository,
            options: self.options.expanded(),
        };
        walker.fetch_children_deep(id).await
    }

    /// Hydrates, expands and descends one block.
    fn descend(&self, block: Block) -> BoxFuture<'_, Result<Block, NotionError>> {
        async move {
            let mut block = hydrate_table(self.repository, block).await?;

            if self.needs_expansion(&block) {
                let id = block.common.id.clone().ok_or_else(|| NotionError::MissingBlockId {
                    action: BlockAction::ExpandChildren,
                    block_type: block.block_type().to_string(),
                })?;
                let children = fetch_all_children(self.repository, &id)
                    .await
                    .map_err(|e| e.in_block(&id, BlockAction::ExpandChildren))?;
                if let Some(slot) = block.children_mut() {
                    *slot = children;
                }
            }

            if let Some(slot) = block.children_mut() {
                if !slot.is_empty() {
                    let children = std::mem::take(slot);
                    let children = self.descend_all(children).await?;
                    if let Some(slot) = block.children_mut() {
                        *slot = children;
                    }
                }
            }

            Ok(block)
        }
        .boxed()
    }

    fn needs_expansion(&self, block: &Block) -> bool {
        self.options.expand_nested
            && !block.is_table()
            && block.has_children()
            && block.children().is_some_and(<[Block]>::is_empty)
    }

    /// Descends siblings, keeping document order. The first failure aborts
    /// the rest.
    async fn descend_all(&self, blocks: Vec<Block>) -> Result<Vec<Block>, NotionError> {
        if self.options.concurrency <= 1 {
            let mut descended = Vec::with_capacity(blocks.len());
            for block in blocks {
                descended.push(self.descend(block).await?);
            }
            return Ok(descended);
        }

        stream::iter(blocks.into_iter().map(|block| self.descend(block)))
            .buffered(self.options.concurrency)
            .try_collect()
            .await
    }
}
