// src/models/path.rs
// The decoded coordinate path and its binary layout constants

/// Size of an inflated program record.
pub const DECODED_SIZE: usize = 1028;
/// The little-endian u32 point count at the front of a record.
pub const HEADER_SIZE: usize = 4;
/// One (x, y) pair of little-endian u16s.
pub const POINT_SIZE: usize = 4;
/// Largest path a record can hold.
pub const MAX_POINTS: usize = (DECODED_SIZE - HEADER_SIZE) / POINT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Up,
    Down,
}

/// A point in the 0..=65535 program space.
///
/// (0, 0) is the pen-up sentinel of the format, so a real point at the
/// origin cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const PEN_UP: Point = Point { x: 0, y: 0 };

    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn pen_state(&self) -> PenState {
        if self.x == 0 && self.y == 0 {
            PenState::Up
        } else {
            PenState::Down
        }
    }

    pub fn is_pen_up(&self) -> bool {
        self.pen_state() == PenState::Up
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinatePath {
    points: Vec<Point>,
}

impl CoordinatePath {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn pen_states(&self) -> impl Iterator<Item = PenState> + '_ {
        self.points.iter().map(Point::pen_state)
    }

    /// Runs of consecutive pen-down points, in path order.
    pub fn strokes(&self) -> Vec<&[Point]> {
        self.points
            .split(Point::is_pen_up)
            .filter(|run| !run.is_empty())
            .collect()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl From<Vec<Point>> for CoordinatePath {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for CoordinatePath {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CoordinatePath {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
