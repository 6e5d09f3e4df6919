//! Constructors for blocks that are about to be written to the API.

use super::blocks::*;
use super::{Block, BlockKind};
use crate::types::RichText;

fn text_block(rich_text: Vec<RichText>) -> TextBlock {
    TextBlock {
        rich_text,
        ..TextBlock::default()
    }
}

fn heading_block(rich_text: Vec<RichText>) -> HeadingBlock {
    HeadingBlock {
        rich_text,
        ..HeadingBlock::default()
    }
}

impl Block {
    pub fn paragraph(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Paragraph(text_block(rich_text)))
    }

    pub fn heading_1(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Heading1(heading_block(rich_text)))
    }

    pub fn heading_2(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Heading2(heading_block(rich_text)))
    }

    pub fn heading_3(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Heading3(heading_block(rich_text)))
    }

    pub fn bulleted_list_item(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::BulletedListItem(text_block(rich_text)))
    }

    pub fn numbered_list_item(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::NumberedListItem(text_block(rich_text)))
    }

    pub fn quote(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Quote(text_block(rich_text)))
    }

    pub fn toggle(rich_text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Toggle(text_block(rich_text)))
    }

    pub fn to_do(rich_text: Vec<RichText>, checked: bool) -> Self {
        Self::new(BlockKind::ToDo(ToDoBlock {
            rich_text,
            checked,
            ..ToDoBlock::default()
        }))
    }

    pub fn code(rich_text: Vec<RichText>, language: impl Into<String>) -> Self {
        Self::new(BlockKind::Code(CodeBlock {
            rich_text,
            language: language.into(),
            ..CodeBlock::default()
        }))
    }

    pub fn callout(rich_text: Vec<RichText>, icon: Option<Icon>) -> Self {
        Self::new(BlockKind::Callout(CalloutBlock {
            rich_text,
            icon,
            ..CalloutBlock::default()
        }))
    }

    pub fn divider() -> Self {
        Self::new(BlockKind::Divider(EmptyBlock {}))
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self::new(BlockKind::Equation(EquationBlock {
            expression: expression.into(),
        }))
    }

    pub fn bookmark(url: impl Into<String>) -> Self {
        Self::new(BlockKind::Bookmark(BookmarkBlock {
            url: url.into(),
            caption: Vec::new(),
        }))
    }

    /// A table with its rows. Creating a table requires sending the rows in
    /// the same request; reading one back requires table hydration.
    pub fn table(table_width: usize, has_column_header: bool, rows: Vec<Block>) -> Self {
        Self::new(BlockKind::Table(TableBlock {
            table_width,
            has_column_header,
            has_row_header: false,
            children: rows,
        }))
    }

    pub fn table_row(cells: Vec<Vec<RichText>>) -> Self {
        Self::new(BlockKind::TableRow(TableRowBlock { cells }))
    }

    /// Replaces the child list of a container block. Leaf blocks are
    /// returned unchanged.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        if let Some(slot) = self.children_mut() {
            *slot = children;
        }
        self
    }
}
