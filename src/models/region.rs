use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Text,
    UiElement,
}

/// A detected area of the screen, in screen coordinates.
///
/// Regions are rebuilt from scratch every capture cycle and have no identity
/// across cycles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub bounds: Rect,
    pub content_type: ContentType,
    /// OCR confidence in `[0, 100]` for text, a fixed nominal value for UI elements.
    pub confidence: f32,
    pub content: Option<String>,
}

impl Region {
    /// Returns `None` for degenerate bounds.
    pub fn text(bounds: Rect, confidence: f32, content: impl Into<String>) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        Some(Self {
            bounds,
            content_type: ContentType::Text,
            confidence,
            content: Some(content.into()),
        })
    }

    /// Returns `None` for degenerate bounds.
    pub fn ui_element(bounds: Rect, confidence: f32) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        Some(Self {
            bounds,
            content_type: ContentType::UiElement,
            confidence,
            content: None,
        })
    }

    pub fn is_text(&self) -> bool {
        self.content_type == ContentType::Text
    }

    pub fn top_left(&self) -> Point {
        self.bounds.top_left()
    }
}
