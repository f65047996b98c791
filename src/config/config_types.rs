// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 656,
            height: 656,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StyleConfig {
    pub dot_size: f32,
    pub pen_size: f32,
    pub background: [f32; 3], // rgb, 0.0-1.0
    pub ink: [f32; 3],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            dot_size: 10.0,
            pen_size: 10.0,
            background: [1.0, 1.0, 1.0],
            ink: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SpeedConfig {
    pub default: u8, // 0-10, 0 for no delay
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self { default: 10 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        // comment tiles are 3:1
        Self {
            image_width: 420,
            image_height: 140,
        }
    }
}
