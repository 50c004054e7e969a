//! Geometry of the stock chart badge.
//!
//! Everything here is a pure function of the icon size, so the same size
//! always produces the same badge, line and arrowhead.

use crate::canvas::Point;

/// Number of vertices in the zig-zag line.
pub const CHART_POINTS: u32 = 5;

/// Direction of the final chart segment, in screen terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
}

impl Trend {
    /// Trend of the last segment of `points`, or `None` with fewer than two points.
    ///
    /// Image space grows downward, so a segment rises when its end has a
    /// smaller y than its start.
    pub fn of_last_segment(points: &[Point]) -> Option<Self> {
        match points {
            [.., prev, last] if last.1 < prev.1 => Some(Trend::Rising),
            [.., _, _] => Some(Trend::Falling),
            _ => None,
        }
    }
}

/// Layout of a single icon, derived from its size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub size: u32,
    pub padding: u32,
    pub radius: u32,
}

impl ChartLayout {
    pub fn new(size: u32) -> Self {
        let padding = size / 8;
        let radius = (size - 2 * padding) / 2;

        Self {
            size,
            padding,
            radius,
        }
    }

    /// Center and radius of the circle inscribed in the padded bounds.
    pub fn badge(&self) -> (Point, f32) {
        let lo = self.padding as f32;
        let hi = (self.size - self.padding) as f32;
        let center = (lo + hi) / 2.0;

        ((center, center), (hi - lo) / 2.0)
    }

    /// Evenly spaced zig-zag vertices across the padded width.
    ///
    /// Even indices sit at the low position, half a radius above the bottom
    /// padding; odd indices sit a full radius above it.
    pub fn line_points(&self) -> Vec<Point> {
        let inner = self.size - 2 * self.padding;
        let bottom = (self.size - self.padding) as f32;

        (0..CHART_POINTS)
            .map(|i| {
                let step = u64::from(i) * u64::from(inner) / u64::from(CHART_POINTS - 1);
                let x = u64::from(self.padding) + step;
                let lift = 0.5 + 0.5 * (i % 2) as f32;
                (x as f32, bottom - self.radius as f32 * lift)
            })
            .collect()
    }

    pub fn stroke_width(&self) -> f32 {
        (self.size / 16).max(1) as f32
    }

    pub fn arrow_size(&self) -> u32 {
        self.size / 8
    }
}

/// Triangle marking the end of the chart line.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrowhead {
    pub trend: Trend,
    pub apex: Point,
    pub base: [Point; 2],
}

impl Arrowhead {
    /// Build the arrowhead at the last of `points`, pointing along the trend
    /// of the final segment.
    pub fn at_end_of(points: &[Point], arrow_size: u32) -> Option<Self> {
        let trend = Trend::of_last_segment(points)?;
        let &(x, y) = points.last()?;

        let length = arrow_size as f32;
        let half = (arrow_size / 2) as f32;
        let apex_y = match trend {
            Trend::Rising => y - length,
            Trend::Falling => y + length,
        };

        Some(Self {
            trend,
            apex: (x, apex_y),
            base: [(x - half, y), (x + half, y)],
        })
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.apex, self.base[0], self.base[1]]
    }

    /// Whether the apex sits above the base in image space.
    pub fn points_up(&self) -> bool {
        self.apex.1 < self.base[0].1
    }
}
