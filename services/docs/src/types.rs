//! Bodies of `documents.batchUpdate` and `documents.get`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single update applied to a document. Exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<InsertTextRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_inline_image: Option<InsertInlineImageRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_text_style: Option<UpdateTextStyleRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_content_range: Option<DeleteContentRangeRequest>,
}

impl Request {
    pub fn insert_text(req: InsertTextRequest) -> Self {
        Self {
            insert_text: Some(req),
            ..Default::default()
        }
    }

    pub fn insert_inline_image(req: InsertInlineImageRequest) -> Self {
        Self {
            insert_inline_image: Some(req),
            ..Default::default()
        }
    }

    pub fn update_text_style(req: UpdateTextStyleRequest) -> Self {
        Self {
            update_text_style: Some(req),
            ..Default::default()
        }
    }

    pub fn delete_content_range(range: Range) -> Self {
        Self {
            delete_content_range: Some(DeleteContentRangeRequest { range }),
            ..Default::default()
        }
    }
}

/// Insert text at `location`, or at the end of the body when `end_of_segment_location`
/// is set instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_segment_location: Option<EndOfSegmentLocation>,
    pub text: String,
}

impl InsertTextRequest {
    /// Append `text` to the end of the document body.
    pub fn at_end(text: impl Into<String>) -> Self {
        Self {
            location: None,
            end_of_segment_location: Some(EndOfSegmentLocation::default()),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertInlineImageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_segment_location: Option<EndOfSegmentLocation>,
    pub uri: String,
}

impl InsertInlineImageRequest {
    /// Append the image at `uri` to the end of the document body.
    pub fn at_end(uri: impl Into<String>) -> Self {
        Self {
            location: None,
            end_of_segment_location: Some(EndOfSegmentLocation::default()),
            uri: uri.into(),
        }
    }
}

/// Apply `text_style` to `range`. Only the style fields named in `fields` are touched,
/// `"*"` selects all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub range: Range,
    pub text_style: TextStyle,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentRangeRequest {
    pub range: Range,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    pub index: i64,
}

/// The end of a segment. An unset `segment_id` means the document body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfSegmentLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

/// Half-open range `[start_index, end_index)` of UTF-16 code units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    pub start_index: i64,
    pub end_index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: String,
}

/// Result of `documents.batchUpdate`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateDocumentResponse {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub replies: Vec<Value>,
    #[serde(default)]
    pub write_control: Option<Value>,
}

/// A document as returned by `documents.get`.
///
/// Only the structure needed to locate content is typed. Element payloads stay raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub revision_id: Option<String>,
    #[serde(default)]
    pub body: Option<Body>,
}

impl Document {
    /// The last structural element of the body, if any.
    pub fn last_element(&self) -> Option<&StructuralElement> {
        self.body.as_ref().and_then(|b| b.content.last())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    /// Absent on the first element, which starts at 0.
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub end_index: i64,
    #[serde(default)]
    pub paragraph: Option<Value>,
    #[serde(default)]
    pub section_break: Option<Value>,
    #[serde(default)]
    pub table: Option<Value>,
}

impl StructuralElement {
    /// The range covered by this element.
    pub fn range(&self) -> Range {
        Range {
            segment_id: None,
            start_index: self.start_index,
            end_index: self.end_index,
        }
    }
}
