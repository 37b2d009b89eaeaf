//! Typed model of Notion page properties.
//!
//! Reads and writes use different shapes on the wire: a read comes back as a
//! type-tagged object carrying the full value (`Property`), while an update
//! payload only carries the new value under the type key (`PropertyWrite`).
//!
//! "Empty" is type-specific. A number property with value `0` counts as
//! unset, a rich-text property is unset when its fragment list is empty, and
//! so on. There is deliberately no universal null check.

use serde::{Deserialize, Serialize};

/// A rich text fragment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichTextItem {
    /// Rendered text content.
    #[serde(default)]
    pub plain_text: String,
}

/// A select / multi-select option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub name: String,
}

/// A file or attachment entry. Only the name is of interest here; the
/// variant-specific URL objects are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRef {
    #[serde(default)]
    pub name: String,
}

/// A reference to a related page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationRef {
    pub id: String,
}

/// A page property value as read from the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Files { files: Vec<FileRef> },
    Relation { relation: Vec<RelationRef> },
    Select { select: Option<SelectOption> },
    /// Any property type this tool does not reconcile (dates, formulas, ...).
    #[serde(other)]
    Other,
}

impl Property {
    /// Whether the property currently holds no value, per its own type's
    /// emptiness rule. Unknown property types are never considered empty so
    /// they are never written to.
    pub fn is_empty(&self) -> bool {
        match self {
            Property::Title { title } => title.is_empty(),
            Property::RichText { rich_text } => rich_text.is_empty(),
            Property::Number { number } => match number {
                None => true,
                Some(n) => *n == 0.0,
            },
            Property::MultiSelect { multi_select } => multi_select.is_empty(),
            Property::Files { files } => files.is_empty(),
            Property::Relation { relation } => relation.is_empty(),
            Property::Select { select } => select.is_none(),
            Property::Other => false,
        }
    }

    /// Extract trimmed plain text from a title or rich-text property.
    /// Returns `None` for other types or when there is no text.
    pub fn plain_text(&self) -> Option<String> {
        let items = match self {
            Property::Title { title } => title,
            Property::RichText { rich_text } => rich_text,
            _ => return None,
        };
        let text = items.first()?.plain_text.trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Names of the selected options in a multi-select property.
    pub fn multi_select_names(&self) -> Vec<String> {
        match self {
            Property::MultiSelect { multi_select } => {
                multi_select.iter().map(|o| o.name.clone()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Ids of the related pages in a relation property.
    pub fn relation_ids(&self) -> Vec<String> {
        match self {
            Property::Relation { relation } => relation.iter().map(|r| r.id.clone()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Rich text content for an update payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichTextWrite {
    pub text: TextContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub content: String,
}

/// An externally hosted file for an update payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileWrite {
    pub name: String,
    pub external: ExternalFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalFile {
    pub url: String,
}

/// A property value in an update payload.
///
/// Serializes untagged: each variant's single field carries the type key the
/// API expects, e.g. `{"rich_text": [{"text": {"content": "..."}}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyWrite {
    RichText { rich_text: Vec<RichTextWrite> },
    Number { number: f64 },
    MultiSelect { multi_select: Vec<SelectOption> },
    Files { files: Vec<FileWrite> },
    Relation { relation: Vec<RelationRef> },
    Select { select: SelectOption },
}

impl PropertyWrite {
    /// A rich-text value with a single text fragment.
    pub fn rich_text(content: impl Into<String>) -> Self {
        PropertyWrite::RichText {
            rich_text: vec![RichTextWrite {
                text: TextContent {
                    content: content.into(),
                },
            }],
        }
    }

    /// A plain number value.
    pub fn number(value: f64) -> Self {
        PropertyWrite::Number { number: value }
    }

    /// A multi-select value from option names.
    pub fn multi_select<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PropertyWrite::MultiSelect {
            multi_select: names
                .into_iter()
                .map(|n| SelectOption { name: n.into() })
                .collect(),
        }
    }

    /// A files value holding one externally hosted file.
    pub fn external_file(name: impl Into<String>, url: impl Into<String>) -> Self {
        PropertyWrite::Files {
            files: vec![FileWrite {
                name: name.into(),
                external: ExternalFile { url: url.into() },
            }],
        }
    }

    /// A relation value from page ids.
    pub fn relation<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PropertyWrite::Relation {
            relation: ids.into_iter().map(|id| RelationRef { id: id.into() }).collect(),
        }
    }

    /// A single-select value.
    pub fn select(name: impl Into<String>) -> Self {
        PropertyWrite::Select {
            select: SelectOption { name: name.into() },
        }
    }
}
