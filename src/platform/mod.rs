//! Capability interfaces for the OS-facing collaborators.
//!
//! Screen capture, OCR, window queries and process lookup are provided by the
//! host application. The core only depends on these traits.

pub mod process;
pub mod window;

pub use process::SysinfoProcessInfo;
pub use window::{list_selectable_windows, process_name_for_window, WindowEntry};

use std::fmt;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::error::{OcrEngineError, ProcessResolutionError, WindowGeometryError};
use crate::geometry::{Point, Rect};

/// Opaque window identifier issued by the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Raw RGB8 pixels as delivered by the capture collaborator.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub trait PixelSource: Send + Sync {
    /// Capture the whole screen, or only `area` when given.
    fn capture(&self, area: Option<Rect>) -> anyhow::Result<Frame>;
}

/// Page layout hint passed to the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// Scattered words, no paragraph structure assumed. One token per word.
    SparseText,
    /// A single uniform block of text. One token per line.
    SingleBlock,
}

/// One recognized word (or line, in [`LayoutMode::SingleBlock`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    /// Engine confidence in `[0, 100]`; negative for structural entries.
    pub confidence: f32,
    pub bounds: Rect,
}

pub trait OcrEngine: Send + Sync {
    fn recognize_with_layout(
        &self,
        image: &GrayImage,
        layout: LayoutMode,
    ) -> Result<Vec<OcrToken>, OcrEngineError>;
}

pub trait WindowSystem: Send + Sync {
    fn foreground_window(&self) -> Result<WindowHandle, WindowGeometryError>;
    fn window_title(&self, handle: WindowHandle) -> Result<String, WindowGeometryError>;
    /// Outer window rectangle in screen coordinates.
    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WindowGeometryError>;
    /// Client rectangle in window-local coordinates.
    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, WindowGeometryError>;
    fn client_to_screen(
        &self,
        handle: WindowHandle,
        point: Point,
    ) -> Result<Point, WindowGeometryError>;
    /// Visible top-level windows as `(title, handle)` pairs, in z-order.
    fn enumerate_visible_windows(&self) -> Vec<(String, WindowHandle)>;
    fn window_process_id(&self, handle: WindowHandle) -> Result<u32, WindowGeometryError>;
}

pub trait ProcessInfo: Send + Sync {
    fn process_name(&self, pid: u32) -> Result<String, ProcessResolutionError>;
}
