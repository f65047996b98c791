pub mod geometry;
pub mod path;

pub use geometry::{WorldBounds, COORD_SCALE, WORLD_EXTENT};
pub use path::{
    CoordinatePath, PenState, Point, DECODED_SIZE, HEADER_SIZE, MAX_POINTS, POINT_SIZE,
};
