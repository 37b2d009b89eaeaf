//! Page and query types for the page database API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::properties::Property;

/// A database page with its property values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    /// Opaque page identifier.
    pub id: String,
    /// Property values keyed by field name.
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

impl Page {
    /// Look up a property by field name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Trimmed plain text of a title or rich-text property, if any.
    pub fn plain_text(&self, name: &str) -> Option<String> {
        self.property(name).and_then(|p| p.plain_text())
    }
}

/// A database query filter.
///
/// Only the shapes this tool needs are modeled; `to_json` produces the
/// API's filter object.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    /// Matches pages satisfying any of the inner filters.
    Or(Vec<QueryFilter>),
    /// Matches pages whose rich-text property is empty.
    RichTextIsEmpty(String),
    /// Matches pages whose files property has no files.
    FilesIsEmpty(String),
}

impl QueryFilter {
    /// Render the filter as the API's JSON filter object.
    pub fn to_json(&self) -> Value {
        match self {
            QueryFilter::Or(filters) => {
                json!({ "or": filters.iter().map(|f| f.to_json()).collect::<Vec<_>>() })
            }
            QueryFilter::RichTextIsEmpty(property) => {
                json!({ "property": property, "rich_text": { "is_empty": true } })
            }
            QueryFilter::FilesIsEmpty(property) => {
                json!({ "property": property, "files": { "is_empty": true } })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_filter_json() {
        let filter = QueryFilter::Or(vec![
            QueryFilter::RichTextIsEmpty("Overview".to_string()),
            QueryFilter::FilesIsEmpty("Art".to_string()),
        ]);

        assert_eq!(
            filter.to_json(),
            json!({
                "or": [
                    { "property": "Overview", "rich_text": { "is_empty": true } },
                    { "property": "Art", "files": { "is_empty": true } },
                ]
            })
        );
    }
}
