//! Screen-space geometry and the window/client/screen coordinate adapter.

use serde::{Deserialize, Serialize};

use crate::error::WindowGeometryError;
use crate::platform::{WindowHandle, WindowSystem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer rectangle: top-left corner plus extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle spanning two corner points, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            x: left,
            y: top,
            width: a.x.max(b.x) - left,
            height: a.y.max(b.y) - top,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Edges count as inside on all four sides.
    pub fn contains_point_inclusive(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.bottom()
    }
}

/// Client area of `handle` expressed in screen coordinates.
///
/// The client rectangle comes back in window-local coordinates; both of its
/// corners are pushed through the window system's client→screen transform.
pub fn client_area_in_screen_space(
    window: &dyn WindowSystem,
    handle: WindowHandle,
) -> Result<Rect, WindowGeometryError> {
    let client = window.client_rect(handle)?;
    let top_left = window.client_to_screen(handle, client.top_left())?;
    let bottom_right = window.client_to_screen(handle, client.bottom_right())?;
    Ok(Rect::from_corners(top_left, bottom_right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWindowSystem;

    #[test]
    fn client_area_is_offset_into_screen_space() {
        let window = FakeWindowSystem::single("Editor", Rect::new(100, 50, 800, 600))
            .with_client(Rect::new(0, 0, 780, 560), Point::new(110, 80));

        let area = client_area_in_screen_space(&window, FakeWindowSystem::HANDLE).unwrap();
        assert_eq!(area, Rect::new(110, 80, 780, 560));
        assert_eq!(area.bottom_right(), Point::new(890, 640));
    }

    #[test]
    fn closed_window_is_a_geometry_error() {
        let window = FakeWindowSystem::single("Editor", Rect::new(0, 0, 10, 10));
        let err = client_area_in_screen_space(&window, WindowHandle(999)).unwrap_err();
        assert_eq!(err, WindowGeometryError::InvalidHandle(WindowHandle(999)));
    }

    #[test]
    fn inclusive_containment_on_every_edge() {
        let rect = Rect::new(10, 20, 100, 50);
        assert!(rect.contains_point_inclusive(Point::new(10, 20)));
        assert!(rect.contains_point_inclusive(Point::new(110, 70)));
        assert!(rect.contains_point_inclusive(Point::new(10, 70)));
        assert!(!rect.contains_point_inclusive(Point::new(9, 20)));
        assert!(!rect.contains_point_inclusive(Point::new(10, 71)));
    }

    #[test]
    fn corners_in_any_order() {
        let rect = Rect::from_corners(Point::new(50, 40), Point::new(10, 5));
        assert_eq!(rect, Rect::new(10, 5, 40, 35));
    }
}
