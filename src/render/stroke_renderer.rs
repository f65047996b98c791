// src/render/stroke_renderer.rs
// Replays a coordinate path on a drawing surface
//
// The renderer owns its surface for the whole session:
// new -> render -> clear -> render -> ... -> close

use nannou::prelude::*;
use tracing::debug;

use super::{DrawingSurface, Speed};
use crate::models::{CoordinatePath, PenState, Point, WorldBounds, COORD_SCALE};

pub const DEFAULT_DOT_SIZE: f32 = 10.0;

pub struct StrokeRenderer<S: DrawingSurface> {
    surface: S,
    speed: Speed,
    dot_size: f32,
}

/// Scales a program point into the renderer's world coordinates.
pub fn to_world(point: &Point) -> Point2 {
    pt2(
        <f32 as From<_>>::from(point.x) / COORD_SCALE,
        <f32 as From<_>>::from(point.y) / COORD_SCALE,
    )
}

impl<S: DrawingSurface> StrokeRenderer<S> {
    pub fn new(surface: S, speed: Speed) -> Self {
        Self {
            surface,
            speed,
            dot_size: DEFAULT_DOT_SIZE,
        }
    }

    pub fn with_dot_size(mut self, dot_size: f32) -> Self {
        self.dot_size = dot_size;
        self
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Draws one path. An empty path leaves the surface untouched.
    pub fn render(&mut self, path: &CoordinatePath) {
        if path.is_empty() {
            debug!("Skipping empty path");
            return;
        }

        self.surface.set_speed(self.speed);
        self.surface.set_world_coordinates(WorldBounds::program());

        for point in path {
            match point.pen_state() {
                PenState::Up => self.surface.pen_up(),
                PenState::Down => {
                    self.surface.move_to(to_world(point));
                    self.surface.dot(self.dot_size);
                }
            }
        }
        debug!(
            "Rendered {} points in {} strokes",
            path.len(),
            path.strokes().len()
        );
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Ends the session and hands the surface back.
    pub fn close(mut self) -> S {
        self.surface.close();
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingSurface, SurfaceCommand};

    fn renderer() -> StrokeRenderer<RecordingSurface> {
        StrokeRenderer::new(RecordingSurface::new(), Speed::FASTEST)
    }

    #[test]
    fn test_empty_path_is_a_no_op() {
        let mut renderer = renderer();
        renderer.render(&CoordinatePath::default());
        assert!(renderer.surface().commands().is_empty());
    }

    #[test]
    fn test_pen_up_then_dot() {
        let mut renderer = renderer();
        let path: CoordinatePath = vec![Point::new(0, 0), Point::new(100, 200)].into();
        renderer.render(&path);

        assert_eq!(
            renderer.surface().commands(),
            &[
                SurfaceCommand::SetSpeed(Speed::FASTEST),
                SurfaceCommand::SetWorldCoordinates(WorldBounds::program()),
                SurfaceCommand::PenUp,
                SurfaceCommand::MoveTo(pt2(1.0, 2.0)),
                SurfaceCommand::Dot(DEFAULT_DOT_SIZE),
            ]
        );
    }

    #[test]
    fn test_state_is_per_point() {
        let mut renderer = renderer();
        let path: CoordinatePath = vec![
            Point::new(500, 0),
            Point::PEN_UP,
            Point::PEN_UP,
            Point::new(0, 700),
        ]
        .into();
        renderer.render(&path);

        let commands = &renderer.surface().commands()[2..];
        assert_eq!(
            commands,
            &[
                SurfaceCommand::MoveTo(pt2(5.0, 0.0)),
                SurfaceCommand::Dot(DEFAULT_DOT_SIZE),
                SurfaceCommand::PenUp,
                SurfaceCommand::PenUp,
                SurfaceCommand::MoveTo(pt2(0.0, 7.0)),
                SurfaceCommand::Dot(DEFAULT_DOT_SIZE),
            ]
        );
    }

    #[test]
    fn test_scaling_covers_program_range() {
        let far = to_world(&Point::new(u16::MAX, u16::MAX));
        assert!((far.x - 655.35).abs() < 1e-3);
        assert!((far.y - 655.35).abs() < 1e-3);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut renderer = StrokeRenderer::new(RecordingSurface::new(), Speed::INSTANT)
            .with_dot_size(4.0);
        let path: CoordinatePath = vec![Point::new(100, 100)].into();

        renderer.render(&path);
        renderer.clear();
        renderer.set_speed(Speed::new(3).unwrap());
        renderer.render(&path);
        let surface = renderer.close();

        let commands = surface.commands();
        assert_eq!(commands.len(), 10);
        assert_eq!(commands[0], SurfaceCommand::SetSpeed(Speed::INSTANT));
        assert_eq!(commands[3], SurfaceCommand::Dot(4.0));
        assert_eq!(commands[4], SurfaceCommand::Clear);
        assert_eq!(commands[5], SurfaceCommand::SetSpeed(Speed::new(3).unwrap()));
        assert!(surface.is_closed());
    }
}
