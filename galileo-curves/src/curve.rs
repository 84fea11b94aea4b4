use geo_types::{Coord, LineString};

use crate::circular_string::CircularString;
use crate::compound_curve::CompoundCurve;
use crate::curved::CurvedGeometry;
use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::ordinates::OrdinateBuffer;
use crate::text;

/// A line that may be curved.
///
/// This is what can be used as a piece of a [`CompoundCurve`], a ring of a
/// [`CurvePolygon`](crate::CurvePolygon) or a member of a [`MultiCurve`](crate::MultiCurve).
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    /// Sequence of straight segments.
    Straight(LineString<f64>),
    /// Sequence of circular arcs.
    Circular(CircularString),
    /// Mix of the above.
    Compound(CompoundCurve),
}

impl Curve {
    /// Returns true if the curve contains arcs (even if they are all degenerate).
    pub fn is_curved(&self) -> bool {
        !matches!(self, Curve::Straight(_))
    }

    /// Returns true if the curve has no points.
    pub fn is_empty(&self) -> bool {
        match self {
            Curve::Straight(line) => line.0.is_empty(),
            Curve::Circular(curve) => curve.is_empty(),
            Curve::Compound(curve) => curve.is_empty(),
        }
    }

    /// First point of the curve.
    pub fn start_point(&self) -> Option<Coord<f64>> {
        match self {
            Curve::Straight(line) => line.0.first().copied(),
            Curve::Circular(curve) => curve.start_point(),
            Curve::Compound(curve) => curve.start_point(),
        }
    }

    /// Last point of the curve.
    pub fn end_point(&self) -> Option<Coord<f64>> {
        match self {
            Curve::Straight(line) => line.0.last().copied(),
            Curve::Circular(curve) => curve.end_point(),
            Curve::Compound(curve) => curve.end_point(),
        }
    }

    /// Returns true if the curve is not empty and ends exactly where it starts.
    pub fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    /// Same curve going in the opposite direction.
    pub fn reverse(&self) -> Curve {
        match self {
            Curve::Straight(line) => {
                Curve::Straight(LineString::new(line.0.iter().rev().copied().collect()))
            }
            Curve::Circular(curve) => Curve::Circular(curve.reverse()),
            Curve::Compound(curve) => Curve::Compound(curve.reverse()),
        }
    }

    /// Linearization with the curve's own tolerance. Straight lines are returned as is.
    pub fn linearize(&self) -> LineString<f64> {
        match self {
            Curve::Straight(line) => line.clone(),
            Curve::Circular(curve) => (*curve.linearize()).clone(),
            Curve::Compound(curve) => (*curve.linearize()).clone(),
        }
    }

    /// Linearization with the given tolerance. Straight lines are returned as is.
    pub fn linearize_with(&self, tolerance: f64) -> Result<LineString<f64>, CurveError> {
        match self {
            Curve::Straight(line) => Ok(line.clone()),
            Curve::Circular(curve) => Ok((*curve.linearize_with(tolerance)?).clone()),
            Curve::Compound(curve) => Ok((*curve.linearize_with(tolerance)?).clone()),
        }
    }

    // `tolerance` must already be validated.
    pub(crate) fn linearize_unchecked(&self, tolerance: f64) -> LineString<f64> {
        match self {
            Curve::Straight(line) => line.clone(),
            curved => {
                let mut buffer = OrdinateBuffer::new();
                curved.append_linearized(tolerance, &mut buffer);
                buffer.into_line_string()
            }
        }
    }

    // `tolerance` must already be validated.
    pub(crate) fn append_linearized(&self, tolerance: f64, buffer: &mut OrdinateBuffer) {
        match self {
            Curve::Straight(line) => buffer.add_line_string(line),
            Curve::Circular(curve) => curve.append_linearized(tolerance, buffer),
            Curve::Compound(curve) => curve.append_linearized(tolerance, buffer),
        }
    }

    /// Bounding box of the curve.
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Curve::Straight(line) => Envelope::from_coords(line.coords().copied()),
            Curve::Circular(curve) => curve.envelope(),
            Curve::Compound(curve) => curve.envelope(),
        }
    }

    /// Number of ordinates per point.
    pub fn coordinate_dimension(&self) -> usize {
        match self {
            Curve::Straight(_) => 2,
            Curve::Circular(curve) => curve.coordinate_dimension(),
            Curve::Compound(curve) => curve.coordinate_dimension(),
        }
    }

    /// Writes the curve as a member of a curve aware collection: curved pieces with their tag, straight lines as a
    /// bare coordinate list.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Curve::Straight(line) => text::write_line_string(out, line),
            Curve::Circular(curve) => curve.write_curved_text(out),
            Curve::Compound(curve) => curve.write_curved_text(out),
        }
    }

    /// Text of the curve, see [`Curve::write_text`].
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    // Fast path equality used by compound geometries: same variant with exactly the same points.
    pub(crate) fn same_points(&self, other: &Curve) -> bool {
        match (self, other) {
            (Curve::Straight(a), Curve::Straight(b)) => a == b,
            (Curve::Circular(a), Curve::Circular(b)) => a.has_same_control_points(b),
            (Curve::Compound(a), Curve::Compound(b)) => a.has_same_components(b),
            _ => false,
        }
    }
}

impl From<LineString<f64>> for Curve {
    fn from(value: LineString<f64>) -> Self {
        Self::Straight(value)
    }
}

impl From<CircularString> for Curve {
    fn from(value: CircularString) -> Self {
        Self::Circular(value)
    }
}

impl From<CompoundCurve> for Curve {
    fn from(value: CompoundCurve) -> Self {
        Self::Compound(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn straight_curve() {
        let curve = Curve::from(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
        assert!(!curve.is_curved());
        assert!(!curve.is_closed());
        assert_eq!(curve.start_point(), Some(coord! { x: 0.0, y: 0.0 }));
        assert_eq!(
            curve.reverse().start_point(),
            Some(coord! { x: 1.0, y: 1.0 })
        );
        assert_eq!(curve.to_text(), "(0.0 0.0, 1.0 0.0, 1.0 1.0)");
        assert_eq!(curve.envelope(), Some(Envelope::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(curve.linearize_with(0.0).unwrap().0.len(), 3);
    }

    #[test]
    fn empty_straight_curve_is_not_closed() {
        let curve = Curve::from(LineString::<f64>::new(vec![]));
        assert!(curve.is_empty());
        assert!(!curve.is_closed());
        assert_eq!(curve.to_text(), "EMPTY");
    }

    #[test]
    fn circular_curve() {
        let curve = Curve::from(
            CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 0.1).unwrap(),
        );
        assert!(curve.is_curved());
        assert_eq!(curve.end_point(), Some(coord! { x: 2.0, y: 0.0 }));
        assert_eq!(curve.to_text(), "CIRCULARSTRING (0.0 0.0, 1.0 1.0, 2.0 0.0)");
        assert!(curve.linearize().0.len() > 3);
    }
}
