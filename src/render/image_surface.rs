// src/render/image_surface.rs
// Rasterises strokes into an RGBA image for headless output

use nannou::image::{ImageResult, Rgba, RgbaImage};
use nannou::prelude::*;
use std::path::Path;

use super::{DrawingSurface, RenderParams, Speed};
use crate::models::WorldBounds;

pub struct ImageSurface {
    image: RgbaImage,
    params: RenderParams,
    bounds: WorldBounds,
    // pixel position of the pen while it is down
    position: Option<Point2>,
    closed: bool,
}

fn to_rgba(color: Rgb<f32>) -> Rgba<u8> {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        255,
    ])
}

impl ImageSurface {
    pub fn new(width: u32, height: u32, params: RenderParams) -> Self {
        let image = RgbaImage::from_pixel(width, height, to_rgba(params.paper));
        Self {
            image,
            params,
            bounds: WorldBounds::program(),
            position: None,
            closed: false,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image.save(path)
    }

    fn to_pixel(&self, position: Point2) -> Point2 {
        let unit = self.bounds.normalize(position);
        pt2(
            unit.x * self.image.width() as f32,
            unit.y * self.image.height() as f32,
        )
    }

    /// Fills a disc of `diameter` pixels centred on `center`.
    fn stamp(&mut self, center: Point2, diameter: f32) {
        let radius = (diameter / 2.0).max(0.5);
        let (width, height) = self.image.dimensions();
        let ink = to_rgba(self.params.ink);

        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = ((center.x + radius).ceil().max(0.0) as u32).min(width);
        let max_y = ((center.y + radius).ceil().max(0.0) as u32).min(height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let dx = px as f32 + 0.5 - center.x;
                let dy = py as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius * radius {
                    self.image.put_pixel(px, py, ink);
                }
            }
        }
    }

    fn line(&mut self, from: Point2, to: Point2) {
        let steps = from.distance(to).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(from.lerp(to, t), self.params.pen_size);
        }
    }
}

impl DrawingSurface for ImageSurface {
    // a still image has no pace
    fn set_speed(&mut self, _speed: Speed) {}

    fn set_world_coordinates(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
        self.position = None;
    }

    fn pen_up(&mut self) {
        self.position = None;
    }

    fn move_to(&mut self, position: Point2) {
        let target = self.to_pixel(position);
        if let Some(previous) = self.position {
            self.line(previous, target);
        }
        self.position = Some(target);
    }

    fn dot(&mut self, size: f32) {
        if let Some(center) = self.position {
            self.stamp(center, size);
        }
    }

    fn clear(&mut self) {
        let paper = to_rgba(self.params.paper);
        for pixel in self.image.pixels_mut() {
            *pixel = paper;
        }
        self.position = None;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoordinatePath, Point};
    use crate::render::StrokeRenderer;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn render(points: Vec<Point>) -> ImageSurface {
        let surface = ImageSurface::new(656, 656, RenderParams::default());
        let mut renderer = StrokeRenderer::new(surface, Speed::INSTANT).with_dot_size(4.0);
        renderer.render(&CoordinatePath::from(points));
        renderer.close()
    }

    #[test]
    fn test_blank_surface_is_paper() {
        let surface = ImageSurface::new(10, 5, RenderParams::default());
        assert_eq!(surface.image().dimensions(), (10, 5));
        assert!(surface.image().pixels().all(|p| *p == PAPER));
    }

    #[test]
    fn test_dot_lands_in_centre() {
        let surface = render(vec![Point::new(32768, 32768)]);
        assert_eq!(*surface.image().get_pixel(328, 328), INK);
        assert_eq!(*surface.image().get_pixel(0, 0), PAPER);
        assert!(surface.is_closed());
    }

    #[test]
    fn test_world_origin_is_top_left_pixel() {
        let surface = render(vec![Point::new(100, 100)]);
        assert_eq!(*surface.image().get_pixel(1, 1), INK);
        assert_eq!(*surface.image().get_pixel(1, 654), PAPER);
    }

    #[test]
    fn test_pen_down_points_are_joined() {
        let surface = render(vec![Point::new(10000, 10000), Point::new(50000, 10000)]);
        // halfway along the segment, well away from either dot
        assert_eq!(*surface.image().get_pixel(200, 100), INK);
    }

    #[test]
    fn test_pen_up_breaks_the_line() {
        let surface = render(vec![
            Point::new(10000, 10000),
            Point::PEN_UP,
            Point::new(50000, 10000),
        ]);
        assert_eq!(*surface.image().get_pixel(200, 100), PAPER);
    }

    #[test]
    fn test_clear_restores_paper() {
        let surface = ImageSurface::new(656, 656, RenderParams::default());
        let mut renderer = StrokeRenderer::new(surface, Speed::INSTANT);
        renderer.render(&CoordinatePath::from(vec![Point::new(32768, 32768)]));
        renderer.clear();

        let surface = renderer.close();
        assert!(surface.image().pixels().all(|p| *p == PAPER));
    }
}
