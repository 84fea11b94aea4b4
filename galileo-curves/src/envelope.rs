use geo_types::{coord, Coord, Rect};
use serde::{Deserialize, Serialize};

/// Axis aligned bounding box of a geometry.
///
/// Unlike [`Rect`] it can be grown in place, which is what arc envelope computation needs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Smallest x.
    pub x_min: f64,
    /// Smallest y.
    pub y_min: f64,
    /// Largest x.
    pub x_max: f64,
    /// Largest y.
    pub y_max: f64,
}

impl Envelope {
    /// Creates a new envelope from its bounds.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Smallest x.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Largest x.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Smallest y.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Largest y.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Size along the x axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Size along the y axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Envelope of a single point.
    pub fn from_coord(c: Coord<f64>) -> Self {
        Self {
            x_min: c.x,
            x_max: c.x,
            y_min: c.y,
            y_max: c.y,
        }
    }

    /// Envelope of all the points, `None` if there are none.
    pub fn from_coords(mut coords: impl Iterator<Item = Coord<f64>>) -> Option<Self> {
        let mut envelope = Self::from_coord(coords.next()?);
        for c in coords {
            envelope.expand_to_include(c.x, c.y);
        }

        Some(envelope)
    }

    /// Grows the envelope so that it contains the point.
    pub fn expand_to_include(&mut self, x: f64, y: f64) {
        if x < self.x_min {
            self.x_min = x;
        }
        if x > self.x_max {
            self.x_max = x;
        }
        if y < self.y_min {
            self.y_min = y;
        }
        if y > self.y_max {
            self.y_max = y;
        }
    }

    /// Smallest envelope containing both envelopes.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Returns true if the point is inside the envelope or on its border.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Middle point of the envelope.
    pub fn center(&self) -> Coord<f64> {
        coord! {
            x: (self.x_min + self.x_max) / 2.0,
            y: (self.y_min + self.y_max) / 2.0,
        }
    }
}

impl From<Envelope> for Rect<f64> {
    fn from(value: Envelope) -> Self {
        Rect::new(
            coord! { x: value.x_min, y: value.y_min },
            coord! { x: value.x_max, y: value.y_max },
        )
    }
}

impl From<Rect<f64>> for Envelope {
    fn from(value: Rect<f64>) -> Self {
        Self {
            x_min: value.min().x,
            y_min: value.min().y,
            x_max: value.max().x,
            y_max: value.max().y,
        }
    }
}

/// Merges envelopes of several geometries. Returns `None` if the iterator yields no envelopes.
pub(crate) fn merge_all(envelopes: impl IntoIterator<Item = Option<Envelope>>) -> Option<Envelope> {
    envelopes
        .into_iter()
        .flatten()
        .reduce(|acc, envelope| acc.merge(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand() {
        let mut envelope = Envelope::from_coord(coord! { x: 1.0, y: 1.0 });
        envelope.expand_to_include(-1.0, 3.0);
        envelope.expand_to_include(0.0, 2.0);

        assert_eq!(envelope, Envelope::new(-1.0, 1.0, 1.0, 3.0));
        assert_eq!(envelope.width(), 2.0);
        assert_eq!(envelope.height(), 2.0);
        assert!(envelope.contains(coord! { x: 0.0, y: 1.5 }));
        assert!(!envelope.contains(coord! { x: 0.0, y: 0.5 }));
    }

    #[test]
    fn merge_all_skips_empty() {
        let merged = merge_all([
            None,
            Some(Envelope::new(0.0, 0.0, 1.0, 1.0)),
            Some(Envelope::new(2.0, -1.0, 3.0, 0.5)),
        ]);
        assert_eq!(merged, Some(Envelope::new(0.0, -1.0, 3.0, 1.0)));
        assert_eq!(merge_all([None, None]), None);
    }
}
