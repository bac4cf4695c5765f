use image::{imageops, GrayImage, RgbImage};
use imageproc::contours::{find_contours, Contour};

use crate::config::DetectionConfig;
use crate::geometry::Rect;
use crate::models::Region;

use super::preprocess::{binarize_inverted, to_intensity};

/// Blob detection: outer contours of dark shapes, kept when large enough.
pub fn detect_ui_regions(image: &RgbImage, config: &DetectionConfig) -> Vec<Region> {
    let gray = to_intensity(image);
    let binary = pad_with_background(&binarize_inverted(&gray, config.ui_threshold));

    find_contours::<i32>(&binary)
        .iter()
        .filter(|contour| contour.parent.is_none())
        .filter_map(bounding_rect)
        .filter_map(|bounds| ui_region_for_bounds(bounds, config))
        .collect()
}

/// Surround the mask with a 1px background ring so shapes touching the
/// image border are still traced as top-level outer contours.
fn pad_with_background(binary: &GrayImage) -> GrayImage {
    let mut padded = GrayImage::new(binary.width() + 2, binary.height() + 2);
    imageops::replace(&mut padded, binary, 1, 1);
    padded
}

/// Axis-aligned box covering every contour pixel, edges inclusive, mapped
/// back from padded to frame coordinates.
fn bounding_rect(contour: &Contour<i32>) -> Option<Rect> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in &contour.points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Some(Rect::new(
        min_x - 1,
        min_y - 1,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}

/// Both dimensions must strictly exceed the minimum size.
pub fn ui_region_for_bounds(bounds: Rect, config: &DetectionConfig) -> Option<Region> {
    if bounds.width > config.min_ui_element_size && bounds.height > config.min_ui_element_size {
        Region::ui_element(bounds, config.ui_element_confidence)
    } else {
        None
    }
}
