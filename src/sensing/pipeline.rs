use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use image::RgbImage;

use crate::config::ContextConfig;
use crate::context::{ContextState, CycleResult};
use crate::detection::{decode_frame, RegionDetector};
use crate::metrics::{CycleMetrics, MetricsCollector};
use crate::organizer::TextOrganizer;
use crate::platform::{OcrEngine, PixelSource, WindowSystem};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Collaborators plus the detector and organizer for one capture cycle.
#[derive(Clone)]
pub struct ContextPipeline {
    pixels: Arc<dyn PixelSource>,
    window: Arc<dyn WindowSystem>,
    detector: RegionDetector,
    organizer: TextOrganizer,
    state: Arc<ContextState>,
    metrics: MetricsCollector,
    config: ContextConfig,
}

impl ContextPipeline {
    pub fn new(
        pixels: Arc<dyn PixelSource>,
        ocr: Arc<dyn OcrEngine>,
        window: Arc<dyn WindowSystem>,
        state: Arc<ContextState>,
        config: ContextConfig,
    ) -> Self {
        Self {
            detector: RegionDetector::new(ocr, config.detection.clone()),
            organizer: TextOrganizer::new(Arc::clone(&window), config.organizer.clone()),
            pixels,
            window,
            state,
            metrics: MetricsCollector::new(),
            config,
        }
    }

    pub fn state(&self) -> &Arc<ContextState> {
        &self.state
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Detect and organize a frame the caller already has, then publish it.
    pub fn process_frame(&self, image: &RgbImage) -> Arc<CycleResult> {
        let (result, _) = self.build_cycle(image);
        self.state.publish(result);
        self.state.latest()
    }

    /// Capture → detect → organize → publish. Nothing is published unless
    /// every step finished; an abandoned or failed cycle leaves the previous
    /// result in place.
    pub async fn run_cycle(&self) -> Result<CycleMetrics> {
        let cycle_start = Instant::now();
        let pipeline = self.clone();

        let (result, mut metrics) = tokio::task::spawn_blocking(move || {
            let capture_start = Instant::now();
            let frame = pipeline
                .pixels
                .capture(None)
                .context("screen capture failed")?;
            let image = decode_frame(frame).map_err(|err| anyhow!("skipping frame: {err}"))?;
            let capture_ms = capture_start.elapsed().as_millis() as u64;

            let (result, mut metrics) = pipeline.build_cycle(&image);
            metrics.capture_ms = capture_ms;
            Ok::<_, anyhow::Error>((result, metrics))
        })
        .await
        .context("capture worker join failed")??;

        self.state.publish(result);

        let system = self.metrics.sample_system_metrics().await;
        metrics.cpu_percent = system.cpu_percent;
        metrics.memory_mb = system.memory_mb;
        metrics.total_ms = cycle_start.elapsed().as_millis() as u64;
        self.metrics.record_cycle(metrics.clone()).await;

        log_info!(
            "Cycle completed in {}ms ({}x{}, capture: {}ms, detect: {}ms, organize: {}ms, {} text / {} ui regions, {} lines)",
            metrics.total_ms,
            metrics.frame_width,
            metrics.frame_height,
            metrics.capture_ms,
            metrics.detect_ms,
            metrics.organize_ms,
            metrics.text_regions,
            metrics.ui_regions,
            metrics.lines
        );

        Ok(metrics)
    }

    fn build_cycle(&self, image: &RgbImage) -> (CycleResult, CycleMetrics) {
        let detect_start = Instant::now();
        let outcome = self.detector.detect_with_outcome(image);
        let detect_ms = detect_start.elapsed().as_millis() as u64;

        let organize_start = Instant::now();
        let organized = match self.window.foreground_window() {
            Ok(handle) => Some(self.organizer.organize(&outcome.regions, handle)),
            Err(err) => {
                log_warn!("no active window this cycle, skipping text organization: {err}");
                None
            }
        };
        let organize_ms = organize_start.elapsed().as_millis() as u64;

        let metrics = CycleMetrics {
            timestamp: Utc::now(),
            detect_ms,
            organize_ms,
            frame_width: image.width(),
            frame_height: image.height(),
            text_regions: outcome.text_count,
            ui_regions: outcome.ui_count,
            lines: organized.as_ref().map(|o| o.lines.len()).unwrap_or(0),
            ocr_failed: outcome.ocr_error.is_some(),
            ..CycleMetrics::default()
        };

        let result = CycleResult {
            completed_at: Some(metrics.timestamp),
            regions: outcome.regions,
            organized,
        };

        (result, metrics)
    }
}
