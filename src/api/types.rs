// src/api/types.rs
//! Wire envelopes shared by the block endpoints.

use crate::model::codec::KeyedPayload;
use crate::model::{Block, BlockKind};
use crate::types::BlockId;
use serde::{Deserialize, Serialize, Serializer};

fn list_object() -> String {
    "list".to_string()
}

/// Generic paginated response from Notion API.
///
/// `has_more == true` promises a non-empty `next_cursor`; the pagination loop
/// treats a broken promise as an error rather than guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "list_object")]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page holding `results`.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: list_object(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page holding `results` that continues at `cursor`.
    pub fn more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: list_object(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }

    /// The cursor for the next page, ignoring empty strings.
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionApiErrorResponse {
    #[serde(default)]
    pub status: Option<u16>,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Body of `PATCH /blocks/{id}/children`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendBlockChildrenRequest {
    pub children: Vec<Block>,
    /// Insert after this sibling instead of at the end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<BlockId>,
}

impl AppendBlockChildrenRequest {
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            children,
            after: None,
        }
    }

    pub fn after(mut self, sibling: impl Into<BlockId>) -> Self {
        self.after = Some(sibling.into());
        self
    }
}

/// Body of `PATCH /blocks/{id}`: a replacement payload, the archived flag, or
/// both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockUpdate {
    pub kind: Option<BlockKind>,
    pub archived: Option<bool>,
}

impl BlockUpdate {
    /// Replace the block's content. The payload's type must match the
    /// block's current type; the API rejects type changes.
    pub fn content(kind: BlockKind) -> Self {
        Self {
            kind: Some(kind),
            archived: None,
        }
    }

    pub fn archive() -> Self {
        Self {
            kind: None,
            archived: Some(true),
        }
    }

    pub fn restore() -> Self {
        Self {
            kind: None,
            archived: Some(false),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.archived.is_none()
    }
}

impl Serialize for BlockUpdate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct WireUpdate<'a> {
            #[serde(flatten)]
            payload: Option<KeyedPayload<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            archived: Option<bool>,
        }

        WireUpdate {
            payload: self.kind.as_ref().map(KeyedPayload),
            archived: self.archived,
        }
        .serialize(serializer)
    }
}
