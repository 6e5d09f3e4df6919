use crate::types::{wire_type, BlockId, DatabaseId, PageId, PartialUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn block_object() -> String {
    "block".to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Attributes every block carries regardless of its type.
///
/// Blocks built locally for write requests have no `id` and no timestamps;
/// those fields are omitted from the encoded JSON rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    #[serde(default = "block_object")]
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<PartialUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<PartialUser>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self {
            object: block_object(),
            id: None,
            parent: None,
            created_time: None,
            created_by: None,
            last_edited_time: None,
            last_edited_by: None,
            archived: false,
            has_children: false,
        }
    }
}

/// Parent reference with typed IDs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    PageId { page_id: PageId },
    DatabaseId { database_id: DatabaseId },
    BlockId { block_id: BlockId },
    Workspace { workspace: bool },
    /// Parent kinds this client does not model, kept verbatim
    #[serde(untagged)]
    Other(Value),
}

impl Parent {
    pub fn page(id: impl Into<PageId>) -> Self {
        Parent::PageId { page_id: id.into() }
    }

    pub fn database(id: impl Into<DatabaseId>) -> Self {
        Parent::DatabaseId {
            database_id: id.into(),
        }
    }

    pub fn block(id: impl Into<BlockId>) -> Self {
        Parent::BlockId {
            block_id: id.into(),
        }
    }

    pub fn workspace() -> Self {
        Parent::Workspace { workspace: true }
    }

    pub fn kind(&self) -> &str {
        match self {
            Parent::PageId { .. } => "page_id",
            Parent::DatabaseId { .. } => "database_id",
            Parent::BlockId { .. } => "block_id",
            Parent::Workspace { .. } => "workspace",
            Parent::Other(raw) => wire_type(raw),
        }
    }
}
