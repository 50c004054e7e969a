//! In-memory raster canvas the icons are drawn into.
//!
//! All primitives sample at pixel centers, so a pixel at `(x, y)` is tested at
//! `(x + 0.5, y + 0.5)`. Coordinates use image space: the origin is the top
//! left corner and y grows downward. Anything outside the canvas is clipped.

use anyhow::Result;
use image::{ImageBuffer, Rgba, RgbaImage};

/// A point in pixel space.
pub type Point = (f32, f32);

/// Fully transparent background the canvas starts out with.
pub const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Square RGBA drawing surface backed by an [`RgbaImage`].
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Allocate a transparent `size`×`size` canvas.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            anyhow::bail!("Canvas size must be a positive number of pixels");
        }

        Ok(Self {
            pixels: ImageBuffer::from_pixel(size, size, TRANSPARENT),
        })
    }

    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Fill every pixel whose center lies within `radius` of `center`.
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        let (cx, cy) = center;
        let r2 = radius * radius;
        let bounds = (cx - radius, cy - radius, cx + radius, cy + radius);

        self.fill_where(bounds, color, |px, py| {
            let dx = px - cx;
            let dy = py - cy;
            dx * dx + dy * dy <= r2
        });
    }

    /// Stroke a connected line through `points` with the given width.
    ///
    /// Joints and ends are round, since coverage is the distance to the
    /// nearest segment.
    pub fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Rgba<u8>) {
        let half = width / 2.0;

        if points.len() == 1 {
            self.fill_circle(points[0], half, color);
            return;
        }

        for segment in points.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let bounds = (
                a.0.min(b.0) - half,
                a.1.min(b.1) - half,
                a.0.max(b.0) + half,
                a.1.max(b.1) + half,
            );

            self.fill_where(bounds, color, |px, py| {
                distance_to_segment((px, py), a, b) <= half
            });
        }
    }

    /// Fill a closed polygon using the even-odd rule.
    ///
    /// Pixels the outline passes through are filled too, so thin triangles
    /// keep their tip at small sizes. A pixel counts as on the outline when its
    /// center is less than half a pixel from an edge.
    pub fn fill_polygon(&mut self, vertices: &[Point], color: Rgba<u8>) {
        if vertices.len() < 3 {
            return;
        }

        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for &(x, y) in vertices {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let bounds = (min_x - 0.5, min_y - 0.5, max_x + 0.5, max_y + 0.5);
        self.fill_where(bounds, color, |px, py| {
            contains_point(vertices, (px, py)) || near_outline(vertices, (px, py))
        });
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Paint `color` onto every pixel in `bounds` whose center satisfies `covers`.
    fn fill_where<F>(&mut self, bounds: (f32, f32, f32, f32), color: Rgba<u8>, covers: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        let size = self.size() as f32;
        let (min_x, min_y, max_x, max_y) = bounds;

        let x0 = min_x.floor().clamp(0.0, size) as u32;
        let y0 = min_y.floor().clamp(0.0, size) as u32;
        let x1 = max_x.ceil().clamp(0.0, size) as u32;
        let y1 = max_y.ceil().clamp(0.0, size) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                if covers(x as f32 + 0.5, y as f32 + 0.5) {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;

    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    };

    let closest_x = a.0 + t * dx;
    let closest_y = a.1 + t * dy;
    ((p.0 - closest_x).powi(2) + (p.1 - closest_y).powi(2)).sqrt()
}

fn near_outline(vertices: &[Point], p: Point) -> bool {
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        if distance_to_segment(p, vertices[j], vertices[i]) < 0.5 {
            return true;
        }
        j = i;
    }

    false
}

// Crossing-number test, counting edges that straddle the horizontal ray to +x.
fn contains_point(vertices: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];

        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}
