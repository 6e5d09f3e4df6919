//! Payload shapes for each block type.
//!
//! Several block types share a payload shape (paragraph, list items, quote and
//! toggle all carry a [`TextBlock`]); the variant in [`super::BlockKind`] is
//! what distinguishes them.

use super::Block;
use crate::types::{wire_type, BlockId, Color, DatabaseId, PageId, RichText};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Text content block: paragraph, bulleted/numbered list item, quote, toggle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Color::is_default")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Heading 1/2/3 block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadingBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Color::is_default")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_toggleable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Color::is_default")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Template block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Synced block. An original has no `synced_from`; a reference points at it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncedBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_from: Option<SyncedFrom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncedFrom {
    BlockId { block_id: BlockId },
    #[serde(untagged)]
    Other(Value),
}

/// Child page marker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildPageBlock {
    #[serde(default)]
    pub title: String,
}

/// Child database marker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildDatabaseBlock {
    #[serde(default)]
    pub title: String,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquationBlock {
    pub expression: String,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Color::is_default")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Payload of blocks that carry no data of their own: divider, breadcrumb
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyBlock {}

/// Table of contents block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableOfContentsBlock {
    #[serde(default, skip_serializing_if = "Color::is_default")]
    pub color: Color,
}

/// Column list and column blocks: pure layout containers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Link preview block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkPreviewBlock {
    pub url: String,
}

/// Table block.
///
/// `children` holds the table's rows. The API never embeds them: they are
/// attached by table hydration, which lists the children of the table itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableBlock {
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Table row block: cells in column order, each a rich text sequence
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbedBlock {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookmarkBlock {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
}

/// Image, video, file, pdf and audio blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
    #[serde(flatten)]
    pub source: FileObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Link to page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkToPage {
    PageId { page_id: PageId },
    DatabaseId { database_id: DatabaseId },
    CommentId { comment_id: String },
    /// Link targets this client does not model, kept verbatim
    #[serde(untagged)]
    Other(Value),
}

impl LinkToPage {
    pub fn kind(&self) -> &str {
        match self {
            LinkToPage::PageId { .. } => "page_id",
            LinkToPage::DatabaseId { .. } => "database_id",
            LinkToPage::CommentId { .. } => "comment_id",
            LinkToPage::Other(raw) => wire_type(raw),
        }
    }
}

/// Catch-all for the API's `unsupported` type and for types this client
/// does not know yet. The raw payload is kept so it re-encodes unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    pub block_type: String,
    pub payload: serde_json::Value,
}

/// Icon types. Custom emoji and any later icon kinds land in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: HostedFile },
    #[serde(untagged)]
    Other(Value),
}

impl Icon {
    pub fn kind(&self) -> &str {
        match self {
            Icon::Emoji { .. } => "emoji",
            Icon::External { .. } => "external",
            Icon::File { .. } => "file",
            Icon::Other(raw) => wire_type(raw),
        }
    }

    pub fn emoji(emoji: impl Into<String>) -> Self {
        Icon::Emoji {
            emoji: emoji.into(),
        }
    }

    pub fn external(url: impl Into<String>) -> Self {
        Icon::External {
            external: ExternalFile { url: url.into() },
        }
    }
}

/// File object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { external: ExternalFile },
    File { file: HostedFile },
    /// Sources such as `file_upload`, kept verbatim
    #[serde(untagged)]
    Other(Value),
}

impl FileObject {
    pub fn kind(&self) -> &str {
        match self {
            FileObject::External { .. } => "external",
            FileObject::File { .. } => "file",
            FileObject::Other(raw) => wire_type(raw),
        }
    }

    /// The source URL. Empty for sources that carry none.
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
            FileObject::Other(raw) => raw
                .get(wire_type(raw))
                .and_then(|source| source.get("url"))
                .and_then(Value::as_str)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A file hosted by Notion; the URL stops working after `expiry_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}
