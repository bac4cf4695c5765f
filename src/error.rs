//! Typed, recoverable failures reported by the external collaborators.
//!
//! None of these are fatal: each one is contained to the cycle or event that
//! produced it and reported through the `log` facade.

use thiserror::Error;

use crate::platform::WindowHandle;

/// The window handle is invalid or the window closed between calls.
/// Callers treat this as "no active window".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowGeometryError {
    #[error("no foreground window")]
    NoForegroundWindow,
    #[error("invalid or closed window handle {0}")]
    InvalidHandle(WindowHandle),
    #[error("window query failed: {0}")]
    Query(String),
}

/// Looking up the process behind a window failed; callers substitute an empty name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessResolutionError {
    #[error("window lookup failed: {0}")]
    Window(#[from] WindowGeometryError),
    #[error("no process with pid {0}")]
    NotFound(u32),
}

/// The OCR engine is unavailable or failed on this frame. The text pass is
/// skipped for the cycle; the UI pass still runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OcrEngineError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
    #[error("OCR failed: {0}")]
    Failed(String),
}

/// The pixel buffer handed over by the capture collaborator is malformed.
/// The cycle is skipped.
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("empty frame ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("failed to decode captured image: {0}")]
    Decode(#[from] image::ImageError),
}
