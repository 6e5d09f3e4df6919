use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;

/// Macro to reduce boilerplate when every variant's payload is handled the
/// same way. `Unsupported` carries raw JSON instead of a typed payload and
/// gets its own arm.
macro_rules! match_payload {
    ($kind:expr, $payload:ident => $typed:expr, $raw:ident => $untyped:expr) => {
        match $kind {
            BlockKind::Paragraph($payload) => $typed,
            BlockKind::Heading1($payload) => $typed,
            BlockKind::Heading2($payload) => $typed,
            BlockKind::Heading3($payload) => $typed,
            BlockKind::BulletedListItem($payload) => $typed,
            BlockKind::NumberedListItem($payload) => $typed,
            BlockKind::Quote($payload) => $typed,
            BlockKind::ToDo($payload) => $typed,
            BlockKind::Toggle($payload) => $typed,
            BlockKind::Template($payload) => $typed,
            BlockKind::Synced($payload) => $typed,
            BlockKind::ChildPage($payload) => $typed,
            BlockKind::ChildDatabase($payload) => $typed,
            BlockKind::Equation($payload) => $typed,
            BlockKind::Code($payload) => $typed,
            BlockKind::Callout($payload) => $typed,
            BlockKind::Divider($payload) => $typed,
            BlockKind::Breadcrumb($payload) => $typed,
            BlockKind::TableOfContents($payload) => $typed,
            BlockKind::ColumnList($payload) => $typed,
            BlockKind::Column($payload) => $typed,
            BlockKind::LinkPreview($payload) => $typed,
            BlockKind::Table($payload) => $typed,
            BlockKind::TableRow($payload) => $typed,
            BlockKind::Embed($payload) => $typed,
            BlockKind::Bookmark($payload) => $typed,
            BlockKind::Image($payload) => $typed,
            BlockKind::Video($payload) => $typed,
            BlockKind::File($payload) => $typed,
            BlockKind::Pdf($payload) => $typed,
            BlockKind::Audio($payload) => $typed,
            BlockKind::LinkToPage($payload) => $typed,
            BlockKind::Unsupported($raw) => $untyped,
        }
    };
}

pub(crate) use match_payload;

/// The single place that knows which variants hold child blocks.
///
/// No wildcard arm: a new variant does not compile
/// until it is classified as a container or a leaf here.
macro_rules! match_children {
    ($kind:expr, $container:ident => $children:expr) => {
        match $kind {
            BlockKind::Paragraph($container)
            | BlockKind::BulletedListItem($container)
            | BlockKind::NumberedListItem($container)
            | BlockKind::Quote($container)
            | BlockKind::Toggle($container) => Some($children),
            BlockKind::Heading1($container)
            | BlockKind::Heading2($container)
            | BlockKind::Heading3($container) => Some($children),
            BlockKind::ToDo($container) => Some($children),
            BlockKind::Template($container) => Some($children),
            BlockKind::Synced($container) => Some($children),
            BlockKind::Callout($container) => Some($children),
            BlockKind::ColumnList($container) | BlockKind::Column($container) => Some($children),
            BlockKind::Table($container) => Some($children),
            BlockKind::ChildPage(_)
            | BlockKind::ChildDatabase(_)
            | BlockKind::Equation(_)
            | BlockKind::Code(_)
            | BlockKind::Divider(_)
            | BlockKind::Breadcrumb(_)
            | BlockKind::TableOfContents(_)
            | BlockKind::LinkPreview(_)
            | BlockKind::TableRow(_)
            | BlockKind::Embed(_)
            | BlockKind::Bookmark(_)
            | BlockKind::Image(_)
            | BlockKind::Video(_)
            | BlockKind::File(_)
            | BlockKind::Pdf(_)
            | BlockKind::Audio(_)
            | BlockKind::LinkToPage(_)
            | BlockKind::Unsupported(_) => None,
        }
    };
}

/// A block: the attributes shared by all types plus exactly one typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub common: BlockCommon,
    pub kind: BlockKind,
}

/// Every block type the API can return, one variant per wire `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    Quote(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Template(TemplateBlock),
    Synced(SyncedBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    Equation(EquationBlock),
    Code(CodeBlock),
    Callout(CalloutBlock),
    Divider(EmptyBlock),
    Breadcrumb(EmptyBlock),
    TableOfContents(TableOfContentsBlock),
    ColumnList(LayoutBlock),
    Column(LayoutBlock),
    LinkPreview(LinkPreviewBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    Embed(EmbedBlock),
    Bookmark(BookmarkBlock),
    Image(FileBlock),
    Video(FileBlock),
    File(FileBlock),
    Pdf(FileBlock),
    Audio(FileBlock),
    LinkToPage(LinkToPage),
    Unsupported(UnsupportedBlock),
}

impl BlockKind {
    /// The wire `type` tag, which is also the key the payload lives under.
    pub fn block_type(&self) -> &str {
        match self {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading1(_) => "heading_1",
            BlockKind::Heading2(_) => "heading_2",
            BlockKind::Heading3(_) => "heading_3",
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::Quote(_) => "quote",
            BlockKind::ToDo(_) => "to_do",
            BlockKind::Toggle(_) => "toggle",
            BlockKind::Template(_) => "template",
            BlockKind::Synced(_) => "synced_block",
            BlockKind::ChildPage(_) => "child_page",
            BlockKind::ChildDatabase(_) => "child_database",
            BlockKind::Equation(_) => "equation",
            BlockKind::Code(_) => "code",
            BlockKind::Callout(_) => "callout",
            BlockKind::Divider(_) => "divider",
            BlockKind::Breadcrumb(_) => "breadcrumb",
            BlockKind::TableOfContents(_) => "table_of_contents",
            BlockKind::ColumnList(_) => "column_list",
            BlockKind::Column(_) => "column",
            BlockKind::LinkPreview(_) => "link_preview",
            BlockKind::Table(_) => "table",
            BlockKind::TableRow(_) => "table_row",
            BlockKind::Embed(_) => "embed",
            BlockKind::Bookmark(_) => "bookmark",
            BlockKind::Image(_) => "image",
            BlockKind::Video(_) => "video",
            BlockKind::File(_) => "file",
            BlockKind::Pdf(_) => "pdf",
            BlockKind::Audio(_) => "audio",
            BlockKind::LinkToPage(_) => "link_to_page",
            BlockKind::Unsupported(b) => &b.block_type,
        }
    }

    /// Decode the payload found under `block_type`.
    ///
    /// Unknown tags (and the API's own `unsupported`) become
    /// [`BlockKind::Unsupported`]; a known tag with a malformed payload is an
    /// error.
    pub fn from_wire(
        block_type: &str,
        payload: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        let kind = match block_type {
            "paragraph" => BlockKind::Paragraph(from_value(payload)?),
            "heading_1" => BlockKind::Heading1(from_value(payload)?),
            "heading_2" => BlockKind::Heading2(from_value(payload)?),
            "heading_3" => BlockKind::Heading3(from_value(payload)?),
            "bulleted_list_item" => BlockKind::BulletedListItem(from_value(payload)?),
            "numbered_list_item" => BlockKind::NumberedListItem(from_value(payload)?),
            "quote" => BlockKind::Quote(from_value(payload)?),
            "to_do" => BlockKind::ToDo(from_value(payload)?),
            "toggle" => BlockKind::Toggle(from_value(payload)?),
            "template" => BlockKind::Template(from_value(payload)?),
            "synced_block" => BlockKind::Synced(from_value(payload)?),
            "child_page" => BlockKind::ChildPage(from_value(payload)?),
            "child_database" => BlockKind::ChildDatabase(from_value(payload)?),
            "equation" => BlockKind::Equation(from_value(payload)?),
            "code" => BlockKind::Code(from_value(payload)?),
            "callout" => BlockKind::Callout(from_value(payload)?),
            "divider" => BlockKind::Divider(from_value(payload)?),
            "breadcrumb" => BlockKind::Breadcrumb(from_value(payload)?),
            "table_of_contents" => BlockKind::TableOfContents(from_value(payload)?),
            "column_list" => BlockKind::ColumnList(from_value(payload)?),
            "column" => BlockKind::Column(from_value(payload)?),
            "link_preview" => BlockKind::LinkPreview(from_value(payload)?),
            "table" => BlockKind::Table(from_value(payload)?),
            "table_row" => BlockKind::TableRow(from_value(payload)?),
            "embed" => BlockKind::Embed(from_value(payload)?),
            "bookmark" => BlockKind::Bookmark(from_value(payload)?),
            "image" => BlockKind::Image(from_value(payload)?),
            "video" => BlockKind::Video(from_value(payload)?),
            "file" => BlockKind::File(from_value(payload)?),
            "pdf" => BlockKind::Pdf(from_value(payload)?),
            "audio" => BlockKind::Audio(from_value(payload)?),
            "link_to_page" => BlockKind::LinkToPage(from_value(payload)?),
            other => {
                if other != "unsupported" {
                    log::debug!("Unknown block type '{}', keeping raw payload", other);
                }
                BlockKind::Unsupported(UnsupportedBlock {
                    block_type: other.to_string(),
                    payload,
                })
            }
        };
        Ok(kind)
    }

    /// Child blocks of a container variant; `None` for leaf variants.
    pub fn children(&self) -> Option<&[Block]> {
        match_children!(self, b => b.children.as_slice())
    }

    /// Mutable child list of a container variant; `None` for leaf variants.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match_children!(self, b => &mut b.children)
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    pub fn is_table(&self) -> bool {
        matches!(self, BlockKind::Table(_))
    }
}

impl Block {
    /// A block with default common attributes, ready for a write request.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            common: BlockCommon::default(),
            kind,
        }
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.common.id = Some(id.into());
        self
    }

    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.common.has_children = has_children;
        self
    }

    /// Get the block's ID, absent on blocks that were never sent to the API.
    pub fn id(&self) -> Option<&BlockId> {
        self.common.id.as_ref()
    }

    pub fn block_type(&self) -> &str {
        self.kind.block_type()
    }

    /// Whether the API reports children for this block.
    pub fn has_children(&self) -> bool {
        self.common.has_children
    }

    pub fn children(&self) -> Option<&[Block]> {
        self.kind.children()
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        self.kind.children_mut()
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_table(&self) -> bool {
        self.kind.is_table()
    }

    /// Counts this block and all blocks nested beneath it.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(Block::subtree_len).sum())
            .unwrap_or(0)
    }
}
