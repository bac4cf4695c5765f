//! Region detection over a captured frame.
//!
//! Two independent passes whose false-positive modes differ: OCR for text and
//! contour analysis for UI elements. Each keeps its own thresholds. Output is
//! all text regions followed by all UI regions.

pub mod preprocess;
pub mod text;
pub mod ui;

pub use preprocess::{decode_encoded, decode_frame};

use std::sync::Arc;

use image::RgbImage;

use crate::config::DetectionConfig;
use crate::error::OcrEngineError;
use crate::models::Region;
use crate::platform::OcrEngine;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Regions found in one frame, plus what went wrong on the way.
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub regions: Vec<Region>,
    pub text_count: usize,
    pub ui_count: usize,
    /// Set when the text pass was skipped because the OCR engine failed.
    pub ocr_error: Option<OcrEngineError>,
}

#[derive(Clone)]
pub struct RegionDetector {
    ocr: Arc<dyn OcrEngine>,
    config: DetectionConfig,
}

impl RegionDetector {
    pub fn new(ocr: Arc<dyn OcrEngine>, config: DetectionConfig) -> Self {
        Self { ocr, config }
    }

    pub fn detect(&self, image: &RgbImage) -> Vec<Region> {
        self.detect_with_outcome(image).regions
    }

    pub fn detect_with_outcome(&self, image: &RgbImage) -> DetectionOutcome {
        let (mut regions, ocr_error) =
            match text::detect_text_regions(image, self.ocr.as_ref(), &self.config) {
                Ok(regions) => (regions, None),
                Err(err) => {
                    log_warn!("text pass skipped for this frame: {err}");
                    (Vec::new(), Some(err))
                }
            };
        let text_count = regions.len();

        let ui_regions = ui::detect_ui_regions(image, &self.config);
        let ui_count = ui_regions.len();
        regions.extend(ui_regions);

        log::debug!(
            "detected {} text and {} UI regions in {}x{} frame",
            text_count,
            ui_count,
            image.width(),
            image.height()
        );

        DetectionOutcome {
            regions,
            text_count,
            ui_count,
            ocr_error,
        }
    }
}
