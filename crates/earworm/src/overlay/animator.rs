//! Overlay animation model.
//!
//! Pure and clock-free: every call to [`OverlayAnimator::advance`] is one
//! animation step. The overlay thread calls it once per frame interval.

use crate::icon::rgb;

use std::{f32::consts::TAU, time::Duration};

use earworm_core::RecordingState;
use image::Rgba;

/// Time between two animation steps, about 30 frames per second.
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub(crate) const BACKGROUND: Rgba<u8> = rgb(0x0D0D0D);
pub(crate) const PANEL: Rgba<u8> = rgb(0x1A1A1A);
pub(crate) const IDLE: Rgba<u8> = rgb(0x00D26A);
pub(crate) const IDLE_GLOW: Rgba<u8> = rgb(0x00FF80);
pub(crate) const RECORDING: Rgba<u8> = rgb(0xFF4757);
pub(crate) const RECORDING_GLOW: Rgba<u8> = rgb(0xFF6B7A);
pub(crate) const PROCESSING: Rgba<u8> = rgb(0xFFA502);
pub(crate) const PROCESSING_GLOW: Rgba<u8> = rgb(0xFFBE33);
pub(crate) const TOAST: Rgba<u8> = rgb(0x2196F3);
pub(crate) const CHECK: Rgba<u8> = rgb(0x00D26A);

/// Number of bars in the recording sound wave.
pub(crate) const BAR_COUNT: usize = 5;
pub(crate) const BAR_WIDTH: f32 = 4.0;
const BAR_SPACING: f32 = 7.0;
const BAR_OFFSET: f32 = -16.0;
const BAR_MIN_HALF_HEIGHT: f32 = 6.0;
const BAR_SWING: f32 = 16.0;

const PULSE_STEP: f32 = 0.08;
const PULSE_BASE_RADIUS: f32 = 10.0;
const PULSE_SWING: f32 = 4.0;

const SPIN_DEGREES_PER_FRAME: u64 = 8;
/// Frame counter period; a whole number of spinner turns keeps the wrap seamless.
pub(crate) const FRAME_WRAP: u64 = 3600;
const SPIN_BASE_EXTENT: f32 = 70.0;
const SPIN_EXTENT_SWING: f32 = 30.0;

/// Linear interpolation between two colours; `t` is clamped to `0..=1`.
pub(crate) fn lerp_color(from: Rgba<u8>, to: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |i: usize| {
        let (a, b) = (f32::from(from[i]), f32::from(to[i]));
        (a + (b - a) * t).round() as u8
    };
    Rgba([channel(0), channel(1), channel(2), channel(3)])
}

/// One bar of the sound wave, relative to the indicator centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bar {
    pub(crate) offset_x: f32,
    pub(crate) half_height: f32,
    pub(crate) color: Rgba<u8>,
}

/// What the indicator draws this frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scene {
    /// Idle: a glowing circle breathing in and out.
    Pulse { radius: f32, color: Rgba<u8> },
    /// Recording: bars bouncing out of phase.
    SoundWave { bars: [Bar; BAR_COUNT] },
    /// Processing: an arc spinning around the centre.
    Spinner {
        start: f32,
        extent: f32,
        color: Rgba<u8>,
    },
    /// Notification: a badge with a check mark.
    Toast,
}

/// A fully described animation frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Frame {
    pub(crate) scene: Scene,
    pub(crate) status: String,
    pub(crate) hint: String,
    pub(crate) accent: Rgba<u8>,
}

/// Per-state animation with an optional toast on top.
#[derive(Debug)]
pub(crate) struct OverlayAnimator {
    state: RecordingState,
    toast: Option<(String, String)>,
    frame: u64,
    pulse_phase: f32,
    idle_hint: String,
}

impl OverlayAnimator {
    /// Start idle; `trigger` names the push-to-talk combo in the idle hint.
    pub(crate) fn new(trigger: &str) -> Self {
        Self {
            state: RecordingState::Idle,
            toast: None,
            frame: 0,
            pulse_phase: 0.0,
            idle_hint: format!("Hold {} to speak", trigger),
        }
    }

    /// Switch to `state`, dropping any toast.
    pub(crate) fn set_state(&mut self, state: RecordingState) {
        self.state = state;
        self.toast = None;
    }

    /// Show a toast until the next `set_state`.
    pub(crate) fn show_toast(&mut self, title: &str, message: &str) {
        self.toast = Some((title.to_string(), message.to_string()));
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> RecordingState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn is_showing_toast(&self) -> bool {
        self.toast.is_some()
    }

    #[cfg(test)]
    pub(crate) fn counters(&self) -> (u64, f32) {
        (self.frame, self.pulse_phase)
    }

    /// Step the animation and describe the resulting frame.
    pub(crate) fn advance(&mut self) -> Frame {
        self.frame = (self.frame + 1) % FRAME_WRAP;

        if let Some((title, message)) = &self.toast {
            return Frame {
                scene: Scene::Toast,
                status: title.clone(),
                hint: message.clone(),
                accent: TOAST,
            };
        }

        match self.state {
            RecordingState::Idle => {
                self.pulse_phase = (self.pulse_phase + PULSE_STEP) % TAU;
                let pulse = (self.pulse_phase.sin() + 1.0) / 2.0;
                Frame {
                    scene: Scene::Pulse {
                        radius: PULSE_BASE_RADIUS + pulse * PULSE_SWING,
                        color: lerp_color(IDLE, IDLE_GLOW, pulse * 0.5),
                    },
                    status: "Ready".to_string(),
                    hint: self.idle_hint.clone(),
                    accent: IDLE,
                }
            }
            RecordingState::Recording => {
                let step = self.frame as f32;
                let bars = std::array::from_fn(|i| {
                    let phase = step * 0.15 + i as f32 * 0.8;
                    let intensity = phase.sin().abs();
                    Bar {
                        offset_x: BAR_OFFSET + i as f32 * BAR_SPACING,
                        half_height: BAR_MIN_HALF_HEIGHT + intensity * BAR_SWING,
                        color: lerp_color(RECORDING, RECORDING_GLOW, intensity),
                    }
                });
                Frame {
                    scene: Scene::SoundWave { bars },
                    status: "Listening".to_string(),
                    hint: "Release to finish".to_string(),
                    accent: RECORDING,
                }
            }
            RecordingState::Processing => {
                let step = self.frame as f32;
                let shimmer = ((step * 0.15).sin() + 1.0) / 2.0;
                Frame {
                    scene: Scene::Spinner {
                        start: ((self.frame * SPIN_DEGREES_PER_FRAME) % 360) as f32,
                        extent: SPIN_BASE_EXTENT + (step * 0.1).sin() * SPIN_EXTENT_SWING,
                        color: lerp_color(PROCESSING, PROCESSING_GLOW, shimmer),
                    },
                    status: "Transcribing".to_string(),
                    hint: "Please wait...".to_string(),
                    accent: PROCESSING,
                }
            }
        }
    }
}
