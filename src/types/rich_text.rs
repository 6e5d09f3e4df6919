// src/types/rich_text.rs
//! Rich text spans: the inline fragments that make up block content.

use super::{wire_type, Color};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One inline span of styled text, a mention, or an inline equation.
///
/// On the wire the content variant is selected by `type` and carried under a
/// key of the same name, e.g. `{"type": "text", "text": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(flatten)]
    pub content: RichTextContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    /// Create a plain text span, the most common rich text variant.
    ///
    /// ```ignore
    /// RichText::plain("hello")
    /// ```
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            content: RichTextContent::Text {
                text: TextContent {
                    content: text.clone(),
                    link: None,
                },
            },
            annotations: None,
            plain_text: Some(text),
            href: None,
        }
    }

    /// A text span that links to `url`.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        let text = text.into();
        let url = url.into();
        Self {
            content: RichTextContent::Text {
                text: TextContent {
                    content: text.clone(),
                    link: Some(Link { url: url.clone() }),
                },
            },
            annotations: None,
            plain_text: Some(text),
            href: Some(url),
        }
    }

    /// A text span with explicit styling.
    pub fn annotated(text: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            annotations: Some(annotations),
            ..Self::plain(text)
        }
    }

    /// An inline equation span.
    pub fn equation(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Self {
            content: RichTextContent::Equation {
                equation: EquationContent {
                    expression: expression.clone(),
                },
            },
            annotations: None,
            plain_text: Some(expression),
            href: None,
        }
    }

    /// The text a reader would see, falling back to the raw content when the
    /// API did not supply `plain_text` (blocks built locally never do).
    pub fn as_plain_text(&self) -> &str {
        if let Some(plain) = &self.plain_text {
            return plain;
        }
        match &self.content {
            RichTextContent::Text { text } => &text.content,
            RichTextContent::Equation { equation } => &equation.expression,
            RichTextContent::Mention { .. } => "",
        }
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_plain_text())
    }
}

/// Concatenated plain text of a span sequence.
pub fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(RichText::as_plain_text).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextContent {
    Text { text: TextContent },
    Mention { mention: Mention },
    Equation { equation: EquationContent },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationContent {
    pub expression: String,
}

/// Inline mention of another object.
///
/// Mention kinds this client does not model decode into `Other` with their
/// raw JSON, and encode back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    User { user: PartialUser },
    Page { page: ObjectRef },
    Database { database: ObjectRef },
    Date { date: DateRange },
    LinkPreview { link_preview: Link },
    TemplateMention { template_mention: TemplateMention },
    #[serde(untagged)]
    Other(Value),
}

impl Mention {
    pub fn kind(&self) -> &str {
        match self {
            Mention::User { .. } => "user",
            Mention::Page { .. } => "page",
            Mention::Database { .. } => "database",
            Mention::Date { .. } => "date",
            Mention::LinkPreview { .. } => "link_preview",
            Mention::TemplateMention { .. } => "template_mention",
            Mention::Other(raw) => wire_type(raw),
        }
    }
}

/// Reference to a page or database by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: String,
}

/// Date or date range; `start`/`end` are ISO 8601 dates or datetimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMention {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_mention_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_mention_user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

/// Partial user representation, as found in `created_by` and mentions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl fmt::Display for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "User {}", self.id),
        }
    }
}
