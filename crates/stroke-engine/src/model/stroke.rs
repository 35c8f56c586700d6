use serde::{Deserialize, Serialize};
use super::point::Point;

/// One reference stroke of a character: the path a learner must trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStroke {
    pub id: u32,
    /// Position within the character, 1-based.
    pub order: u32,
    /// SVG-like outline for display. Never used for validation.
    #[serde(default)]
    pub path_data: String,
    pub start_point: Point,
    pub end_point: Point,
    /// Ordered points approximating the stroke's shape.
    pub guidance_points: Vec<Point>,
}

impl ReferenceStroke {
    /// Build a stroke whose start and end are the first and last guidance points.
    pub fn from_points(id: u32, order: u32, guidance_points: Vec<Point>) -> Self {
        let start_point = guidance_points.first().copied().unwrap_or_default();
        let end_point = guidance_points.last().copied().unwrap_or_default();
        Self {
            id,
            order,
            path_data: String::new(),
            start_point,
            end_point,
            guidance_points,
        }
    }

    pub fn with_path_data(mut self, path_data: impl Into<String>) -> Self {
        self.path_data = path_data.into();
        self
    }

    pub fn point_count(&self) -> usize {
        self.guidance_points.len()
    }

    /// Total polyline length through the guidance points.
    pub fn length(&self) -> f32 {
        self.guidance_points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}
