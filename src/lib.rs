pub mod actions;
pub mod analysis;
pub mod config;
pub mod context;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod models;
pub mod organizer;
pub mod platform;
pub mod sensing;
pub mod utils;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

pub use actions::{ActionLog, ActionRecorder, InputTracker};
pub use analysis::{analyze_window, WindowAnalysis};
pub use config::ContextConfig;
pub use context::{ContextState, CycleResult};
pub use detection::RegionDetector;
pub use error::{ImageDecodeError, OcrEngineError, ProcessResolutionError, WindowGeometryError};
pub use geometry::{client_area_in_screen_space, Point, Rect};
pub use models::{
    ActionKind, ContentType, ContextSnapshot, InputEvent, MouseButton, OrganizedWindowText,
    Region, UserAction,
};
pub use organizer::TextOrganizer;
pub use platform::{
    Frame, LayoutMode, OcrEngine, OcrToken, PixelSource, ProcessInfo, WindowEntry, WindowHandle,
    WindowSystem,
};
pub use sensing::{CaptureController, ContextPipeline};
pub use utils::init_logging;

/// The host-provided OS capabilities.
#[derive(Clone)]
pub struct Collaborators {
    pub pixels: Arc<dyn PixelSource>,
    pub ocr: Arc<dyn OcrEngine>,
    pub window: Arc<dyn WindowSystem>,
    pub processes: Arc<dyn ProcessInfo>,
}

/// Wires the capture loop, the input tracker and the shared context together.
pub struct ScreenContext {
    collaborators: Collaborators,
    config: ContextConfig,
    state: Arc<ContextState>,
    pipeline: ContextPipeline,
    recorder: ActionRecorder,
    capture: CaptureController,
    input: InputTracker,
}

impl ScreenContext {
    pub fn new(collaborators: Collaborators, config: ContextConfig) -> Self {
        let actions = Arc::new(ActionLog::new(config.action_log.capacity));
        let state = Arc::new(ContextState::new(Arc::clone(&actions)));

        let pipeline = ContextPipeline::new(
            Arc::clone(&collaborators.pixels),
            Arc::clone(&collaborators.ocr),
            Arc::clone(&collaborators.window),
            Arc::clone(&state),
            config.clone(),
        );
        let recorder = ActionRecorder::new(
            actions,
            Arc::clone(&collaborators.window),
            Arc::clone(&collaborators.processes),
        );

        Self {
            collaborators,
            config,
            state,
            pipeline,
            recorder,
            capture: CaptureController::new(),
            input: InputTracker::new(),
        }
    }

    /// Start periodic capture and input tracking. Returns the sender the OS
    /// input hook should push events into.
    pub async fn start(&mut self) -> Result<mpsc::Sender<InputEvent>> {
        let (events_tx, events_rx) =
            InputTracker::channel(self.config.action_log.channel_capacity);
        self.input.start(self.recorder.clone(), events_rx)?;
        if let Err(err) = self.capture.start(self.pipeline.clone()) {
            self.input.stop().await?;
            return Err(err);
        }
        log::info!("screen context started");
        Ok(events_tx)
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.capture.stop().await?;
        self.input.stop().await?;
        log::info!("screen context stopped");
        Ok(())
    }

    pub fn pause(&self) {
        self.capture.pause();
    }

    pub fn resume(&self) {
        self.capture.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.capture.is_paused()
    }

    pub fn state(&self) -> &Arc<ContextState> {
        &self.state
    }

    pub fn pipeline(&self) -> &ContextPipeline {
        &self.pipeline
    }

    /// Record an event directly, bypassing the tracker channel.
    pub fn record(&self, event: InputEvent) -> bool {
        self.recorder.record(event)
    }

    pub fn recent(&self, limit: usize) -> Vec<UserAction> {
        self.state.actions().recent(limit)
    }

    pub fn snapshot(&self, limit: usize) -> ContextSnapshot {
        self.state.snapshot(limit)
    }

    pub fn organized_text(&self) -> Option<OrganizedWindowText> {
        self.state.organized_text()
    }

    pub fn selectable_windows(&self, own_title: &str) -> Vec<WindowEntry> {
        platform::list_selectable_windows(self.collaborators.window.as_ref(), own_title)
    }

    pub fn analyze(&self, handle: WindowHandle) -> Result<WindowAnalysis> {
        analyze_window(
            handle,
            self.collaborators.window.as_ref(),
            self.collaborators.pixels.as_ref(),
            self.collaborators.ocr.as_ref(),
            self.state.actions(),
            self.config.capture.analysis_action_limit,
        )
    }
}
