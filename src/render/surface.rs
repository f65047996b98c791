// src/render/surface.rs
// The drawing surface a StrokeRenderer drives

use nannou::prelude::*;
use std::fmt;

use super::Speed;
use crate::models::WorldBounds;

/// A turtle-like drawing surface.
///
/// Positions are world coordinates within the configured bounds. Setting the
/// bounds and clearing both lift the pen and forget the last position, so a
/// new path never connects to the previous one.
pub trait DrawingSurface {
    fn set_speed(&mut self, speed: Speed);

    fn set_world_coordinates(&mut self, bounds: WorldBounds);

    /// Lift the pen. Nothing is drawn until the next `move_to`.
    fn pen_up(&mut self);

    /// Lower the pen and move to `position`. Surfaces that draw lines connect
    /// it to the previous position when the pen was already down.
    fn move_to(&mut self, position: Point2);

    /// Stamp a dot of `size` pixels at the current position.
    fn dot(&mut self, size: f32);

    fn clear(&mut self);

    /// End the session; the surface takes no further commands.
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetSpeed(Speed),
    SetWorldCoordinates(WorldBounds),
    PenUp,
    MoveTo(Point2),
    Dot(f32),
    Clear,
    Close,
}

impl fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCommand::SetSpeed(speed) => write!(f, "speed {}", speed),
            SurfaceCommand::SetWorldCoordinates(bounds) => write!(
                f,
                "world ({:.2}, {:.2}) ({:.2}, {:.2})",
                bounds.lower_left.x, bounds.lower_left.y, bounds.upper_right.x, bounds.upper_right.y
            ),
            SurfaceCommand::PenUp => write!(f, "pen-up"),
            SurfaceCommand::MoveTo(position) => {
                write!(f, "move-to {:.2} {:.2}", position.x, position.y)
            }
            SurfaceCommand::Dot(size) => write!(f, "dot {}", size),
            SurfaceCommand::Clear => write!(f, "clear"),
            SurfaceCommand::Close => write!(f, "close"),
        }
    }
}
