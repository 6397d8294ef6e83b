//! Content scripts: the ordered list of blocks a document is built from.
//!
//! A script is authored ahead of time, either in code through the
//! [`ContentScript`] builder methods or as JSON:
//!
//! ```json
//! [
//!   {"kind": "title", "text": "SUPPLY CONTRACT"},
//!   {"kind": "heading", "label": "FIRST.", "text": "Object"},
//!   {"kind": "paragraph", "text": "**THE SUPPLIER** agrees...", "align": "justify"},
//!   {"kind": "list_item", "label": "a)", "text": "Deliver on time."},
//!   {"kind": "spacer", "height": 12}
//! ]
//! ```

use crate::error::Result;
use crate::layout::style::Alignment;
use serde::{Deserialize, Serialize};

fn center() -> Alignment {
    Alignment::Center
}

/// One logical unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Title block in the title style, centered unless stated otherwise
    Title {
        /// Title text; line breaks start new title lines
        text: String,
        /// Alignment of every title line
        #[serde(default = "center")]
        align: Alignment,
    },
    /// Section heading with an optional label prefix such as `"FIRST."`
    Heading {
        /// Label drawn before the heading text
        #[serde(default)]
        label: Option<String>,
        /// Heading text
        text: String,
    },
    /// Body paragraph; may contain `**emphasis**` and line breaks
    Paragraph {
        /// Paragraph text
        text: String,
        /// Line alignment
        #[serde(default)]
        align: Alignment,
    },
    /// Labeled list item; wrapped lines hang under the text, not the label
    ListItem {
        /// Label such as `"a)"` or `"1."`
        label: String,
        /// Item text; may contain `**emphasis**`
        text: String,
        /// Line alignment
        #[serde(default)]
        align: Alignment,
    },
    /// Vertical gap
    Spacer {
        /// Gap height in points
        height: f32,
    },
}

/// Ordered content of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentScript {
    blocks: Vec<ContentBlock>,
}

impl ContentScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a script from a JSON array of blocks.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the script as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a block.
    pub fn push(&mut self, block: ContentBlock) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// Append a centered title.
    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(ContentBlock::Title {
            text: text.into(),
            align: Alignment::Center,
        });
        self
    }

    /// Append a heading with an optional label.
    pub fn heading(mut self, label: Option<&str>, text: impl Into<String>) -> Self {
        self.blocks.push(ContentBlock::Heading {
            label: label.map(str::to_string),
            text: text.into(),
        });
        self
    }

    /// Append a paragraph.
    pub fn paragraph(mut self, text: impl Into<String>, align: Alignment) -> Self {
        self.blocks.push(ContentBlock::Paragraph {
            text: text.into(),
            align,
        });
        self
    }

    /// Append a labeled list item.
    pub fn list_item(
        mut self,
        label: impl Into<String>,
        text: impl Into<String>,
        align: Alignment,
    ) -> Self {
        self.blocks.push(ContentBlock::ListItem {
            label: label.into(),
            text: text.into(),
            align,
        });
        self
    }

    /// Append a vertical gap.
    pub fn spacer(mut self, height: f32) -> Self {
        self.blocks.push(ContentBlock::Spacer { height });
        self
    }

    /// Blocks in order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the script has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl FromIterator<ContentBlock> for ContentScript {
    fn from_iter<I: IntoIterator<Item = ContentBlock>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_order() {
        let script = ContentScript::new()
            .title("CONTRATO")
            .heading(Some("PRIMERA."), "Objeto")
            .paragraph("Texto", Alignment::Justify)
            .list_item("a)", "Entregar", Alignment::Left)
            .spacer(12.0);
        assert_eq!(script.len(), 5);
        assert!(matches!(script.blocks()[0], ContentBlock::Title { .. }));
        assert!(matches!(script.blocks()[4], ContentBlock::Spacer { height } if height == 12.0));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let script = ContentScript::from_json(
            r#"[
                {"kind": "title", "text": "CONTRATO"},
                {"kind": "heading", "text": "Objeto"},
                {"kind": "paragraph", "text": "**EL PROVEEDOR** acepta", "align": "justify"},
                {"kind": "list_item", "label": "a)", "text": "Uno"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            script.blocks()[0],
            ContentBlock::Title {
                text: "CONTRATO".to_string(),
                align: Alignment::Center
            }
        );
        assert_eq!(
            script.blocks()[1],
            ContentBlock::Heading {
                label: None,
                text: "Objeto".to_string()
            }
        );
        assert!(matches!(
            script.blocks()[2],
            ContentBlock::Paragraph { align: Alignment::Justify, .. }
        ));
        assert!(matches!(
            script.blocks()[3],
            ContentBlock::ListItem { align: Alignment::Left, .. }
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let err = ContentScript::from_json(r#"[{"kind": "table"}]"#).unwrap_err();
        assert!(matches!(err, crate::Error::Script(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let script = ContentScript::new().paragraph("x", Alignment::Right);
        let back = ContentScript::from_json(&script.to_json().unwrap()).unwrap();
        assert_eq!(back, script);
    }
}
