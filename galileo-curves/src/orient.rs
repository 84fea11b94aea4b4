use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points.
    pub fn triplet(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> Self {
        match (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y) {
            v if v > 0.0 => Self::Clockwise,
            v if v < 0.0 => Self::Counterclockwise,
            _ => Self::Collinear,
        }
    }
}
