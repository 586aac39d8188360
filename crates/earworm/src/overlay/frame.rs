use crate::{
    icon::{clear, fill_circle, fill_rect, stroke_arc, stroke_polyline},
    overlay::animator::{BACKGROUND, BAR_WIDTH, CHECK, Frame, PANEL, Scene},
};

use std::fmt;

use image::RgbaImage;

/// Edge length of a rendered indicator frame.
pub(crate) const FRAME_SIZE: u32 = 64;

const CENTER: f32 = FRAME_SIZE as f32 / 2.0;
const SPINNER_RADIUS: f32 = 14.0;
const SPINNER_WIDTH: f32 = 3.0;
const BADGE_RADIUS: f32 = 18.0;
const BADGE_WIDTH: f32 = 2.0;
const CHECK_WIDTH: f32 = 3.0;

/// A rasterized frame ready for the overlay window.
#[derive(Clone)]
pub struct OverlayFrame {
    /// RGBA8 pixels, row-major.
    pub rgba: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Window title: status and hint.
    pub title: String,
}

impl fmt::Debug for OverlayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl OverlayFrame {
    /// Rasterize `frame`.
    pub(crate) fn render(frame: &Frame) -> Self {
        let img = rasterize(frame);
        let (width, height) = img.dimensions();
        Self {
            rgba: img.into_raw(),
            width,
            height,
            title: format!("{} - {}", frame.status, frame.hint),
        }
    }
}

/// Draw the indicator for `frame` on the panel background.
pub(crate) fn rasterize(frame: &Frame) -> RgbaImage {
    let mut img = RgbaImage::new(FRAME_SIZE, FRAME_SIZE);
    clear(&mut img, PANEL);

    match &frame.scene {
        Scene::Pulse { radius, color } => {
            fill_circle(&mut img, CENTER, CENTER, *radius, *color);
        }
        Scene::SoundWave { bars } => {
            for bar in bars {
                let x = CENTER + bar.offset_x;
                fill_rect(
                    &mut img,
                    x,
                    CENTER - bar.half_height,
                    x + BAR_WIDTH,
                    CENTER + bar.half_height,
                    bar.color,
                );
            }
        }
        Scene::Spinner {
            start,
            extent,
            color,
        } => {
            stroke_arc(
                &mut img,
                CENTER,
                CENTER,
                SPINNER_RADIUS,
                SPINNER_WIDTH,
                0.0,
                360.0,
                BACKGROUND,
            );
            stroke_arc(
                &mut img,
                CENTER,
                CENTER,
                SPINNER_RADIUS,
                SPINNER_WIDTH,
                *start,
                *extent,
                *color,
            );
        }
        Scene::Toast => {
            stroke_arc(
                &mut img,
                CENTER,
                CENTER,
                BADGE_RADIUS,
                BADGE_WIDTH,
                0.0,
                360.0,
                frame.accent,
            );
            stroke_polyline(
                &mut img,
                &[
                    (CENTER - 8.0, CENTER),
                    (CENTER - 2.0, CENTER + 6.0),
                    (CENTER + 10.0, CENTER - 8.0),
                ],
                CHECK_WIDTH,
                CHECK,
            );
        }
    }

    img
}
