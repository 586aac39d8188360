mod animator;
mod frame;
mod surface;
mod window;

pub(crate) use {
    animator::{FRAME_INTERVAL, Frame, OverlayAnimator},
    frame::OverlayFrame,
    surface::{OverlayHandle, spawn_overlay},
    window::OverlayWindow,
};

#[cfg(test)]
pub(crate) use {
    animator::{
        BAR_COUNT, FRAME_WRAP, IDLE, IDLE_GLOW, PANEL, PROCESSING, RECORDING, RECORDING_GLOW,
        Scene, TOAST, lerp_color,
    },
    frame::{FRAME_SIZE, rasterize},
    surface::{FrameSink, READY_TIMEOUT},
};
