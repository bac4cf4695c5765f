//! Plain-text extraction for a single chosen window.
//!
//! Unlike the periodic pipeline this reads the window as one block of text,
//! line by line, and attaches the most recent input actions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::actions::ActionLog;
use crate::detection::decode_frame;
use crate::detection::preprocess::{binarize_otsu, to_intensity};
use crate::geometry::Rect;
use crate::models::UserAction;
use crate::platform::{LayoutMode, OcrEngine, PixelSource, WindowHandle, WindowSystem};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowAnalysis {
    pub analyzed_at: DateTime<Utc>,
    pub window_title: String,
    pub window_rect: Rect,
    pub image_width: u32,
    pub image_height: u32,
    /// Recognized text, trimmed; `None` when nothing was recognized.
    pub text: Option<String>,
    pub recent_actions: Vec<UserAction>,
}

/// Capture `handle`'s window rectangle and read it as a single text block.
///
/// Window geometry and capture failures abort the analysis. An OCR failure
/// does not: the result just carries no text.
pub fn analyze_window(
    handle: WindowHandle,
    window: &dyn WindowSystem,
    pixels: &dyn PixelSource,
    ocr: &dyn OcrEngine,
    actions: &ActionLog,
    action_limit: usize,
) -> Result<WindowAnalysis> {
    let window_rect = window
        .window_rect(handle)
        .with_context(|| format!("window {handle} is not available"))?;
    let window_title = window.window_title(handle).unwrap_or_default();

    let frame = pixels
        .capture(Some(window_rect))
        .with_context(|| format!("failed to capture window {handle}"))?;
    let image = decode_frame(frame).context("captured window image is malformed")?;

    let binary = binarize_otsu(&to_intensity(&image));
    let text = match ocr.recognize_with_layout(&binary, LayoutMode::SingleBlock) {
        Ok(tokens) => {
            let joined = tokens
                .iter()
                .map(|token| token.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let trimmed = joined.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Err(err) => {
            log_warn!("text extraction failed for window {handle}: {err}");
            None
        }
    };

    log_info!(
        "Analyzed \"{}\" ({}x{}, {} chars of text)",
        window_title,
        image.width(),
        image.height(),
        text.as_ref().map(String::len).unwrap_or(0)
    );

    Ok(WindowAnalysis {
        analyzed_at: Utc::now(),
        window_title,
        window_rect,
        image_width: image.width(),
        image_height: image.height(),
        text,
        recent_actions: actions.recent(action_limit),
    })
}
