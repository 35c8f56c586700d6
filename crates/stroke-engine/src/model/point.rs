use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A position on the shared tracing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        self.to_vec2().distance_squared(other.to_vec2())
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        p.to_vec2()
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}
