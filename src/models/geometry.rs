// src/models/geometry.rs
// World-space types shared by the renderer and the drawing surfaces

use nannou::prelude::*;

/// Raw coordinates are divided by this before they reach a surface.
pub const COORD_SCALE: f32 = 100.0;

/// Side length of the square world a program is drawn into.
pub const WORLD_EXTENT: f32 = 655.36;

/// World coordinate bounds of a surface, given turtle-style as the
/// lower-left and upper-right corners. Flipping the y values of the corners
/// flips the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub lower_left: Vec2,
    pub upper_right: Vec2,
}

impl WorldBounds {
    /// Origin at the top-left corner, y growing downward.
    pub fn program() -> Self {
        Self {
            lower_left: pt2(0.0, WORLD_EXTENT),
            upper_right: pt2(WORLD_EXTENT, 0.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.upper_right.x - self.lower_left.x
    }

    pub fn height(&self) -> f32 {
        self.upper_right.y - self.lower_left.y
    }

    /// Maps a world position to unit coordinates where (0, 0) is the top-left
    /// of the output and (1, 1) the bottom-right.
    pub fn normalize(&self, position: Point2) -> Point2 {
        let u = (position.x - self.lower_left.x) / self.width();
        let v = (self.upper_right.y - position.y) / self.height();
        pt2(u, v)
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::program()
    }
}
