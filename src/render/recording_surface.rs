// src/render/recording_surface.rs
// A surface that keeps the commands it receives instead of drawing them

use nannou::prelude::*;

use super::{DrawingSurface, Speed, SurfaceCommand};
use crate::models::WorldBounds;

#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Hands over the commands recorded so far and starts a fresh list.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.last() == Some(&SurfaceCommand::Close)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_speed(&mut self, speed: Speed) {
        self.commands.push(SurfaceCommand::SetSpeed(speed));
    }

    fn set_world_coordinates(&mut self, bounds: WorldBounds) {
        self.commands.push(SurfaceCommand::SetWorldCoordinates(bounds));
    }

    fn pen_up(&mut self) {
        self.commands.push(SurfaceCommand::PenUp);
    }

    fn move_to(&mut self, position: Point2) {
        self.commands.push(SurfaceCommand::MoveTo(position));
    }

    fn dot(&mut self, size: f32) {
        self.commands.push(SurfaceCommand::Dot(size));
    }

    fn clear(&mut self) {
        self.commands.push(SurfaceCommand::Clear);
    }

    fn close(&mut self) {
        self.commands.push(SurfaceCommand::Close);
    }
}
