// src/views/canvas.rs
//
// A DrawingSurface for the nannou window.
// Marks are kept in a display list and revealed over time at the configured speed.

use nannou::lyon::tessellation::LineCap;
use nannou::prelude::*;
use std::time::Duration;

use crate::models::WorldBounds;
use crate::render::{DrawingSurface, RenderParams, Speed};

/// Marks are stored in unit coordinates, (0, 0) top-left and (1, 1)
/// bottom-right of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    Dot { center: Point2, size: f32 },
    Line { from: Point2, to: Point2 },
}

pub struct CanvasSurface {
    marks: Vec<Mark>,
    revealed: usize,
    speed: Speed,
    bounds: WorldBounds,
    position: Option<Point2>,
    params: RenderParams,
    banked: Duration, // time carried toward the next reveal
    closed: bool,
}

impl CanvasSurface {
    pub fn new(params: RenderParams) -> Self {
        Self {
            marks: Vec::new(),
            revealed: 0,
            speed: Speed::default(),
            bounds: WorldBounds::program(),
            position: None,
            params,
            banked: Duration::ZERO,
            closed: false,
        }
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn revealed_marks(&self) -> &[Mark] {
        &self.marks[..self.revealed]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.marks.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn reveal_all(&mut self) {
        self.revealed = self.marks.len();
        self.banked = Duration::ZERO;
    }

    /// Reveals as many marks as fit in `dt` at the current speed.
    pub fn advance(&mut self, dt: Duration) {
        let Some(delay) = self.speed.step_delay() else {
            self.reveal_all();
            return;
        };
        if self.is_complete() {
            return;
        }

        let banked = self.banked + dt;
        let steps = (banked.as_nanos() / delay.as_nanos()) as usize;
        self.banked = Duration::from_nanos((banked.as_nanos() % delay.as_nanos()) as u64);
        self.revealed = (self.revealed + steps).min(self.marks.len());
    }

    /// Maps unit coordinates into a nannou window rect, which has its origin
    /// in the centre and y pointing up.
    pub fn to_window(unit: Point2, rect: Rect) -> Point2 {
        pt2(rect.left() + unit.x * rect.w(), rect.top() - unit.y * rect.h())
    }

    pub fn draw(&self, draw: &Draw, rect: Rect) {
        for mark in self.revealed_marks() {
            match *mark {
                Mark::Dot { center, size } => {
                    draw.ellipse()
                        .xy(Self::to_window(center, rect))
                        .w_h(size, size)
                        .color(self.params.ink);
                }
                Mark::Line { from, to } => {
                    draw.line()
                        .start(Self::to_window(from, rect))
                        .end(Self::to_window(to, rect))
                        .stroke_weight(self.params.pen_size)
                        .caps(LineCap::Round)
                        .color(self.params.ink);
                }
            }
        }
    }

    pub fn background(&self) -> Rgb<f32> {
        self.params.paper
    }
}

impl DrawingSurface for CanvasSurface {
    fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    fn set_world_coordinates(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
        self.position = None;
    }

    fn pen_up(&mut self) {
        self.position = None;
    }

    fn move_to(&mut self, position: Point2) {
        let target = self.bounds.normalize(position);
        if let Some(from) = self.position {
            self.marks.push(Mark::Line { from, to: target });
        }
        self.position = Some(target);
    }

    fn dot(&mut self, size: f32) {
        if let Some(center) = self.position {
            self.marks.push(Mark::Dot { center, size });
        }
    }

    fn clear(&mut self) {
        self.marks.clear();
        self.revealed = 0;
        self.banked = Duration::ZERO;
        self.position = None;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
