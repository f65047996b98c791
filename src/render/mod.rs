// src/render/mod.rs
// The stroke rendering module
// StrokeRenderer replays a decoded path onto anything implementing DrawingSurface

pub mod image_surface;
pub mod recording_surface;
pub mod stroke_renderer;
pub mod surface;

pub use image_surface::ImageSurface;
pub use recording_surface::RecordingSurface;
pub use stroke_renderer::StrokeRenderer;
pub use surface::{DrawingSurface, SurfaceCommand};

use nannou::prelude::*;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::StyleConfig;

#[derive(Debug, Clone)]
pub struct RenderParams {
    pub ink: Rgb<f32>,
    pub paper: Rgb<f32>,
    pub dot_size: f32,
    pub pen_size: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            ink: rgb(0.0, 0.0, 0.0),
            paper: rgb(1.0, 1.0, 1.0),
            dot_size: 10.0,
            pen_size: 10.0,
        }
    }
}

impl From<&StyleConfig> for RenderParams {
    fn from(style: &StyleConfig) -> Self {
        let [r, g, b] = style.ink;
        let [pr, pg, pb] = style.background;
        Self {
            ink: rgb(r, g, b),
            paper: rgb(pr, pg, pb),
            dot_size: style.dot_size,
            pen_size: style.pen_size,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("speed must be between 0 and 10, got {0}")]
pub struct SpeedError(pub u8);

/// Drawing speed, 1 (slowest) to 10 (fastest). 0 removes the delay between
/// steps altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MAX: u8 = 10;
    pub const INSTANT: Speed = Speed(0);
    pub const FASTEST: Speed = Speed(Self::MAX);

    pub fn new(value: u8) -> Result<Self, SpeedError> {
        if value > Self::MAX {
            return Err(SpeedError(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Time between two drawing steps, `None` when there is no delay.
    pub fn step_delay(&self) -> Option<Duration> {
        match self.0 {
            0 => None,
            speed => Some(Duration::from_millis(5 * <u64 as From<_>>::from(Self::MAX + 1 - speed))),
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::FASTEST
    }
}

impl TryFrom<u8> for Speed {
    type Error = SpeedError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
