// src/lib.rs
//
// Decodes the drawings stored in program comments and labels and replays
// them as pen strokes.

pub mod config;
pub mod models;
pub mod render;
pub mod services;
pub mod views;
