//! Programmatic status glyphs.
//!
//! Small anti-aliased raster primitives over `image::RgbaImage`, shared by
//! the tray icons and the overlay frames. Angles are in degrees, measured
//! counter-clockwise from three o'clock.

use crate::{AppError, AppResult};

use std::panic::Location;

use earworm_core::RecordingState;
use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};

/// Edge length of the tray icons.
pub(crate) const TRAY_ICON_SIZE: u32 = 64;

const TRAY_MARGIN: f32 = 4.0;
const TRAY_OUTLINE_WIDTH: f32 = 2.0;

pub(crate) const TRAY_IDLE: Rgba<u8> = rgb(0x4CAF50);
pub(crate) const TRAY_RECORDING: Rgba<u8> = rgb(0xF44336);
pub(crate) const TRAY_PROCESSING: Rgba<u8> = rgb(0xFFC107);
pub(crate) const WHITE: Rgba<u8> = rgb(0xFFFFFF);

/// Opaque colour from `0xRRGGBB`.
pub(crate) const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 0xFF])
}

/// Tray glyph colour for `state`.
pub(crate) fn tray_color(state: RecordingState) -> Rgba<u8> {
    match state {
        RecordingState::Idle => TRAY_IDLE,
        RecordingState::Recording => TRAY_RECORDING,
        RecordingState::Processing => TRAY_PROCESSING,
    }
}

/// Filled circle with a white outline, as shown in the tray.
pub(crate) fn status_circle(size: u32, color: Rgba<u8>) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);
    let center = size as f32 / 2.0;
    let radius = center - TRAY_MARGIN;

    fill_circle(&mut img, center, center, radius, color);
    stroke_arc(
        &mut img,
        center,
        center,
        radius - TRAY_OUTLINE_WIDTH / 2.0,
        TRAY_OUTLINE_WIDTH,
        0.0,
        360.0,
        WHITE,
    );

    img
}

/// Tray icon for `state`.
#[track_caller]
pub(crate) fn tray_icon(state: RecordingState) -> AppResult<tray_icon::Icon> {
    let img = status_circle(TRAY_ICON_SIZE, tray_color(state));
    let (width, height) = img.dimensions();

    tray_icon::Icon::from_rgba(img.into_raw(), width, height).map_err(|e| {
        AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}

/// Fill the whole image with `color`.
pub(crate) fn clear(img: &mut RgbaImage, color: Rgba<u8>) {
    for pixel in img.pixels_mut() {
        *pixel = color;
    }
}

/// Anti-aliased filled circle.
pub(crate) fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = (cx - radius, cy - radius, cx + radius, cy + radius);
    for_each_in_box(img, x0, y0, x1, y1, color, |x, y| {
        radius - (x - cx).hypot(y - cy) + 0.5
    });
}

/// Anti-aliased arc of the circle of `radius`, `width` pixels thick.
///
/// An `extent` of 360 or more draws a full ring.
#[allow(clippy::too_many_arguments)]
pub(crate) fn stroke_arc(
    img: &mut RgbaImage,
    cx: f32,
    cy: f32,
    radius: f32,
    width: f32,
    start: f32,
    extent: f32,
    color: Rgba<u8>,
) {
    let outer = radius + width;
    let (x0, y0, x1, y1) = (cx - outer, cy - outer, cx + outer, cy + outer);
    for_each_in_box(img, x0, y0, x1, y1, color, |x, y| {
        let (dx, dy) = (x - cx, cy - y);
        if extent < 360.0 {
            let angle = dy.atan2(dx).to_degrees();
            if (angle - start).rem_euclid(360.0) > extent {
                return 0.0;
            }
        }
        let distance = dx.hypot(dy);
        width / 2.0 - (distance - radius).abs() + 0.5
    });
}

/// Axis-aligned filled rectangle with fractional edges.
pub(crate) fn fill_rect(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    color: Rgba<u8>,
) {
    for_each_in_box(img, x0, y0, x1, y1, color, |x, y| {
        let horizontal = (x + 0.5).min(x1) - (x - 0.5).max(x0);
        let vertical = (y + 0.5).min(y1) - (y - 0.5).max(y0);
        horizontal.clamp(0.0, 1.0) * vertical.clamp(0.0, 1.0)
    });
}

/// Anti-aliased polyline with round joins.
pub(crate) fn stroke_polyline(
    img: &mut RgbaImage,
    points: &[(f32, f32)],
    width: f32,
    color: Rgba<u8>,
) {
    for segment in points.windows(2) {
        let ((ax, ay), (bx, by)) = (segment[0], segment[1]);
        let pad = width;
        for_each_in_box(
            img,
            ax.min(bx) - pad,
            ay.min(by) - pad,
            ax.max(bx) + pad,
            ay.max(by) + pad,
            color,
            |x, y| width / 2.0 - distance_to_segment((x, y), (ax, ay), (bx, by)) + 0.5,
        );
    }
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let length_sq = abx * abx + aby * aby;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / length_sq).clamp(0.0, 1.0)
    };
    (p.0 - (a.0 + t * abx)).hypot(p.1 - (a.1 + t * aby))
}

/// Blend `color` into every pixel of the box, weighted by `coverage` at the
/// pixel centre.
fn for_each_in_box<F>(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    color: Rgba<u8>,
    coverage: F,
) where
    F: Fn(f32, f32) -> f32,
{
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let left = x0.floor().max(0.0) as u32;
    let top = y0.floor().max(0.0) as u32;
    let right = (x1.ceil().max(0.0) as u32).min(width - 1);
    let bottom = (y1.ceil().max(0.0) as u32).min(height - 1);

    for py in top..=bottom {
        for px in left..=right {
            let amount = coverage(px as f32 + 0.5, py as f32 + 0.5).clamp(0.0, 1.0);
            if amount > 0.0 {
                blend(img.get_pixel_mut(px, py), color, amount);
            }
        }
    }
}

/// Source-over compositing of `color` at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let src_a = coverage * f32::from(color[3]) / 255.0;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }

    for c in 0..3 {
        let src = f32::from(color[c]) * src_a;
        let below = f32::from(dst[c]) * dst_a * (1.0 - src_a);
        dst[c] = ((src + below) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
