use image::RgbImage;

use crate::config::DetectionConfig;
use crate::error::OcrEngineError;
use crate::models::Region;
use crate::platform::{LayoutMode, OcrEngine, OcrToken};

use super::preprocess::{binarize_for_text, to_intensity};

/// Run OCR over the binarized frame and keep the confident, non-blank words.
pub fn detect_text_regions(
    image: &RgbImage,
    ocr: &dyn OcrEngine,
    config: &DetectionConfig,
) -> Result<Vec<Region>, OcrEngineError> {
    let gray = to_intensity(image);
    let binary = binarize_for_text(&gray, config.blur_radius);
    let tokens = ocr.recognize_with_layout(&binary, LayoutMode::SparseText)?;

    Ok(tokens
        .into_iter()
        .filter_map(|token| text_region_from_token(token, config))
        .collect())
}

fn text_region_from_token(token: OcrToken, config: &DetectionConfig) -> Option<Region> {
    if token.confidence <= config.min_text_confidence || token.text.trim().is_empty() {
        return None;
    }

    let region = Region::text(token.bounds, token.confidence, token.text);
    if region.is_none() {
        log::debug!("dropping OCR token with degenerate bounds {:?}", token.bounds);
    }
    region
}
