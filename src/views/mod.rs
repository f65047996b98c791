// src/views/mod.rs

pub mod canvas;

pub use canvas::{CanvasSurface, Mark};
