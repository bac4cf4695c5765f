//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use image::{GrayImage, Rgb, RgbImage};

use crate::error::{OcrEngineError, ProcessResolutionError, WindowGeometryError};
use crate::geometry::{Point, Rect};
use crate::platform::{
    Frame, LayoutMode, OcrEngine, OcrToken, PixelSource, ProcessInfo, WindowHandle, WindowSystem,
};

pub struct FakeWindowSystem {
    title: String,
    window_rect: Rect,
    client_rect: Rect,
    client_origin: Point,
    foreground: bool,
    visible: Vec<(String, WindowHandle)>,
}

impl FakeWindowSystem {
    pub const HANDLE: WindowHandle = WindowHandle(1);
    pub const PID: u32 = 4242;

    /// One window whose client area fills the whole window rectangle.
    pub fn single(title: &str, window_rect: Rect) -> Self {
        Self {
            title: title.to_string(),
            window_rect,
            client_rect: Rect::new(0, 0, window_rect.width, window_rect.height),
            client_origin: window_rect.top_left(),
            foreground: true,
            visible: vec![(title.to_string(), Self::HANDLE)],
        }
    }

    pub fn with_client(mut self, client_rect: Rect, client_origin: Point) -> Self {
        self.client_rect = client_rect;
        self.client_origin = client_origin;
        self
    }

    pub fn with_visible(mut self, visible: Vec<(String, WindowHandle)>) -> Self {
        self.visible = visible;
        self
    }

    pub fn without_foreground(mut self) -> Self {
        self.foreground = false;
        self
    }

    fn check(&self, handle: WindowHandle) -> Result<(), WindowGeometryError> {
        if handle == Self::HANDLE {
            Ok(())
        } else {
            Err(WindowGeometryError::InvalidHandle(handle))
        }
    }
}

impl WindowSystem for FakeWindowSystem {
    fn foreground_window(&self) -> Result<WindowHandle, WindowGeometryError> {
        if self.foreground {
            Ok(Self::HANDLE)
        } else {
            Err(WindowGeometryError::NoForegroundWindow)
        }
    }

    fn window_title(&self, handle: WindowHandle) -> Result<String, WindowGeometryError> {
        self.check(handle)?;
        Ok(self.title.clone())
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WindowGeometryError> {
        self.check(handle)?;
        Ok(self.window_rect)
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, WindowGeometryError> {
        self.check(handle)?;
        Ok(self.client_rect)
    }

    fn client_to_screen(
        &self,
        handle: WindowHandle,
        point: Point,
    ) -> Result<Point, WindowGeometryError> {
        self.check(handle)?;
        Ok(Point::new(
            self.client_origin.x + point.x,
            self.client_origin.y + point.y,
        ))
    }

    fn enumerate_visible_windows(&self) -> Vec<(String, WindowHandle)> {
        self.visible.clone()
    }

    fn window_process_id(&self, handle: WindowHandle) -> Result<u32, WindowGeometryError> {
        self.check(handle)?;
        Ok(Self::PID)
    }
}

#[derive(Default)]
pub struct FakeProcessInfo {
    names: HashMap<u32, String>,
}

impl FakeProcessInfo {
    pub fn with(pid: u32, name: &str) -> Self {
        let mut names = HashMap::new();
        names.insert(pid, name.to_string());
        Self { names }
    }
}

impl ProcessInfo for FakeProcessInfo {
    fn process_name(&self, pid: u32) -> Result<String, ProcessResolutionError> {
        self.names
            .get(&pid)
            .cloned()
            .ok_or(ProcessResolutionError::NotFound(pid))
    }
}

/// Returns canned tokens regardless of the image and remembers each call.
pub struct FakeOcr {
    result: Result<Vec<OcrToken>, OcrEngineError>,
    pub calls: Mutex<Vec<(LayoutMode, u32, u32)>>,
}

impl FakeOcr {
    pub fn returning(tokens: Vec<OcrToken>) -> Self {
        Self {
            result: Ok(tokens),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(OcrEngineError::Unavailable("engine not installed".into())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl OcrEngine for FakeOcr {
    fn recognize_with_layout(
        &self,
        image: &GrayImage,
        layout: LayoutMode,
    ) -> Result<Vec<OcrToken>, OcrEngineError> {
        self.calls
            .lock()
            .unwrap()
            .push((layout, image.width(), image.height()));
        self.result.clone()
    }
}

/// Serves the same image on every capture, cropped to the requested area.
pub struct FakePixelSource {
    image: Option<RgbImage>,
    pub requests: Mutex<Vec<Option<Rect>>>,
}

impl FakePixelSource {
    pub fn serving(image: RgbImage) -> Self {
        Self {
            image: Some(image),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            image: None,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl PixelSource for FakePixelSource {
    fn capture(&self, area: Option<Rect>) -> anyhow::Result<Frame> {
        self.requests.lock().unwrap().push(area);
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| anyhow!("display not available"))?;

        let image = match area {
            Some(rect) => image::imageops::crop_imm(
                image,
                rect.x.max(0) as u32,
                rect.y.max(0) as u32,
                rect.width.max(0) as u32,
                rect.height.max(0) as u32,
            )
            .to_image(),
            None => image.clone(),
        };

        Ok(Frame {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        })
    }
}

pub fn token(text: &str, confidence: f32, x: i32, y: i32) -> OcrToken {
    OcrToken {
        text: text.to_string(),
        confidence,
        bounds: Rect::new(x, y, 8 * text.len().max(1) as i32, 12),
    }
}

/// White canvas with solid black boxes.
pub fn canvas_with_boxes(width: u32, height: u32, boxes: &[Rect]) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for rect in boxes {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                image.put_pixel(x as u32, y as u32, Rgb([0, 0, 0]));
            }
        }
    }
    image
}
