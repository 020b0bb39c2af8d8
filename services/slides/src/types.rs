//! Request and response bodies of `presentations.batchUpdate`.
//!
//! A [`Request`] sets exactly one of its fields, mirroring the API's `oneof`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single update applied to a presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_slide: Option<CreateSlideRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_shape: Option<CreateShapeRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<InsertTextRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_image: Option<CreateImageRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_object: Option<DeleteObjectRequest>,
}

impl Request {
    pub fn create_slide(req: CreateSlideRequest) -> Self {
        Self {
            create_slide: Some(req),
            ..Default::default()
        }
    }

    pub fn create_shape(req: CreateShapeRequest) -> Self {
        Self {
            create_shape: Some(req),
            ..Default::default()
        }
    }

    pub fn insert_text(req: InsertTextRequest) -> Self {
        Self {
            insert_text: Some(req),
            ..Default::default()
        }
    }

    pub fn create_image(req: CreateImageRequest) -> Self {
        Self {
            create_image: Some(req),
            ..Default::default()
        }
    }

    pub fn delete_object(object_id: impl Into<String>) -> Self {
        Self {
            delete_object: Some(DeleteObjectRequest {
                object_id: object_id.into(),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_layout_reference: Option<LayoutReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub predefined_layout: PredefinedLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredefinedLayout {
    Blank,
    CaptionOnly,
    Title,
    TitleAndBody,
    TitleAndTwoColumns,
    TitleOnly,
    SectionHeader,
    SectionTitleAndDescription,
    OneColumnText,
    MainPoint,
    BigNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub element_properties: PageElementProperties,
    pub shape_type: ShapeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    TextBox,
    Rectangle,
    RoundRectangle,
    Ellipse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub element_properties: PageElementProperties,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

/// Where a new element goes and how large it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    pub page_object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub height: Dimension,
    pub width: Dimension,
}

impl Size {
    /// A size in points.
    pub fn pt(width: f64, height: f64) -> Self {
        Self {
            height: Dimension {
                magnitude: height,
                unit: Unit::Pt,
            },
            width: Dimension {
                magnitude: width,
                unit: Unit::Pt,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Emu,
    Pt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    #[serde(default)]
    pub shear_x: f64,
    #[serde(default)]
    pub shear_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: Unit,
}

impl AffineTransform {
    /// Unscaled placement at (`x`, `y`) points.
    pub fn translate_pt(x: f64, y: f64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            translate_x: x,
            translate_y: y,
            unit: Unit::Pt,
        }
    }
}

/// Result of `presentations.batchUpdate`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdatePresentationResponse {
    #[serde(default)]
    pub presentation_id: Option<String>,
    /// One reply per request, in order. Requests without a reply yield `{}`.
    #[serde(default)]
    pub replies: Vec<Value>,
    #[serde(default)]
    pub write_control: Option<Value>,
}
