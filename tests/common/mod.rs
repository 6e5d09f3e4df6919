// tests/common/mod.rs
//! In-memory `BlockRepository` that records every call.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_blocks::{
    Block, BlockId, BlockRepository, NotionError, NotionErrorCode, PaginatedResponse, RichText,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

/// One request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Retrieve(String),
    List {
        container: String,
        cursor: Option<String>,
        page_size: Option<u32>,
    },
}

impl Call {
    pub fn list(container: &str, cursor: Option<&str>) -> Self {
        Call::List {
            container: container.to_string(),
            cursor: cursor.map(str::to_owned),
            page_size: Some(100),
        }
    }
}

type PageKey = (String, Option<String>);

#[derive(Clone, Default)]
pub struct MockBlockRepository {
    blocks: Arc<RwLock<HashMap<String, Block>>>,
    pages: Arc<RwLock<HashMap<PageKey, PaginatedResponse<Block>>>>,
    failures: Arc<RwLock<HashMap<String, u16>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockBlockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the mock store, keyed by its ID.
    pub async fn add_block(&self, block: Block) {
        let id = block.id().expect("stored blocks need an ID").to_string();
        self.blocks.write().await.insert(id, block);
    }

    /// Serve `children` as the single page of `container`.
    pub async fn add_children(&self, container: &str, children: Vec<Block>) {
        self.add_page(container, None, PaginatedResponse::last(children))
            .await;
    }

    /// Serve `page` when `container` is listed at `cursor`.
    pub async fn add_page(
        &self,
        container: &str,
        cursor: Option<&str>,
        page: PaginatedResponse<Block>,
    ) {
        self.pages
            .write()
            .await
            .insert((container.to_string(), cursor.map(str::to_owned)), page);
    }

    /// Make every listing of `container` fail with `status`.
    pub async fn fail_listing(&self, container: &str, status: u16) {
        self.failures
            .write()
            .await
            .insert(container.to_string(), status);
    }

    /// Make every listing of `container` take `delay`.
    pub async fn delay_listing(&self, container: &str, delay: Duration) {
        self.delays
            .write()
            .await
            .insert(container.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listed_containers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List { container, .. } => Some(container),
                Call::Retrieve(_) => None,
            })
            .collect()
    }

    /// Highest number of listings that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BlockRepository for MockBlockRepository {
    async fn retrieve_block(&self, id: &BlockId) -> Result<Block, NotionError> {
        self.record(Call::Retrieve(id.to_string()));
        let blocks = self.blocks.read().await;
        blocks
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| not_found(id.as_str()))
    }

    async fn list_children(
        &self,
        id: &BlockId,
        cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<PaginatedResponse<Block>, NotionError> {
        self.record(Call::List {
            container: id.to_string(),
            cursor: cursor.map(str::to_owned),
            page_size,
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = self.delays.read().await.get(id.as_str()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(status) = self.failures.read().await.get(id.as_str()) {
            return Err(NotionError::Api {
                status: *status,
                code: NotionErrorCode::from_http_status(*status),
                message: format!("listing {} failed", id),
                request_id: None,
            });
        }

        let key = (id.to_string(), cursor.map(str::to_owned));
        Ok(self
            .pages
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_else(|| PaginatedResponse::last(Vec::new())))
    }
}

fn not_found(id: &str) -> NotionError {
    NotionError::Api {
        status: 404,
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find block with ID: {}", id),
        request_id: None,
    }
}

pub fn text(content: &str) -> Vec<RichText> {
    vec![RichText::plain(content)]
}

pub fn row(cells: &[&str]) -> Block {
    Block::table_row(cells.iter().map(|cell| text(cell)).collect())
}

/// A table as the API returns it: an ID, `has_children` set, no rows.
pub fn api_table(id: &str, width: usize) -> Block {
    Block::table(width, true, Vec::new())
        .with_id(id)
        .with_has_children(true)
}
