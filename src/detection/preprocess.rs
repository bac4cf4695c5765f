use image::{GrayImage, RgbImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::median_filter;

use crate::error::ImageDecodeError;
use crate::platform::Frame;

/// Validate a raw RGB8 frame and wrap it as an image.
pub fn decode_frame(frame: Frame) -> Result<RgbImage, ImageDecodeError> {
    let Frame {
        width,
        height,
        pixels,
    } = frame;

    if width == 0 || height == 0 {
        return Err(ImageDecodeError::Empty { width, height });
    }

    let expected = width as usize * height as usize * 3;
    let actual = pixels.len();
    RgbImage::from_raw(width, height, pixels).ok_or(ImageDecodeError::BufferSize {
        width,
        height,
        expected,
        actual,
    })
}

/// Decode an encoded capture (PNG, JPEG, ...) into RGB8.
pub fn decode_encoded(bytes: &[u8]) -> Result<RgbImage, ImageDecodeError> {
    let image = image::load_from_memory(bytes)?.to_rgb8();
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageDecodeError::Empty {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(image)
}

pub fn to_intensity(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Median smoothing followed by a global Otsu threshold.
pub fn binarize_for_text(gray: &GrayImage, blur_radius: u32) -> GrayImage {
    let smoothed = if blur_radius > 0 {
        median_filter(gray, blur_radius, blur_radius)
    } else {
        gray.clone()
    };
    binarize_otsu(&smoothed)
}

/// Global threshold picked from the histogram by minimizing intra-class variance.
pub fn binarize_otsu(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    threshold(gray, level, ThresholdType::Binary)
}

/// Fixed threshold with inverted polarity: dark pixels become foreground (255).
pub fn binarize_inverted(gray: &GrayImage, level: u8) -> GrayImage {
    threshold(gray, level, ThresholdType::BinaryInverted)
}
