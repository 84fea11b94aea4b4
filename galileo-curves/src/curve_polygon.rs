use std::sync::Arc;

use geo_types::{Geometry, LineString, Polygon};

use crate::arc::{tolerance_equals, validate_tolerance};
use crate::cache::LinearizationCache;
use crate::curve::Curve;
use crate::curved::CurvedGeometry;
use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::text;

/// A polygon whose rings may be curved.
///
/// Every non-empty ring must end exactly where it starts. A straight ring needs at least 4 points (the last one
/// repeating the first).
#[derive(Debug, Clone)]
pub struct CurvePolygon {
    exterior: Curve,
    interiors: Vec<Curve>,
    tolerance: f64,
    linearized: LinearizationCache<Polygon<f64>>,
}

impl CurvePolygon {
    /// Creates a new polygon with the given outer ring and holes.
    pub fn new(exterior: Curve, interiors: Vec<Curve>, tolerance: f64) -> Result<Self, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;

        if exterior.is_empty() && !interiors.is_empty() {
            return Err(CurveError::InvalidComponent(
                "polygon with an empty exterior ring cannot have holes".into(),
            ));
        }

        for ring in std::iter::once(&exterior).chain(&interiors) {
            validate_ring(ring)?;
        }

        Ok(Self {
            exterior,
            interiors,
            tolerance,
            linearized: LinearizationCache::new(),
        })
    }

    /// Creates a polygon without any rings.
    pub fn empty(tolerance: f64) -> Result<Self, CurveError> {
        Self::new(Curve::Straight(LineString::new(vec![])), vec![], tolerance)
    }

    /// Outer ring.
    pub fn exterior(&self) -> &Curve {
        &self.exterior
    }

    /// Holes.
    pub fn interiors(&self) -> &[Curve] {
        &self.interiors
    }

    /// Number of holes.
    pub fn num_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    /// Polygon with every ring reversed.
    pub fn reverse(&self) -> Self {
        Self {
            exterior: self.exterior.reverse(),
            interiors: self.interiors.iter().map(Curve::reverse).collect(),
            tolerance: self.tolerance,
            linearized: LinearizationCache::new(),
        }
    }

    /// Returns true if any of the rings is curved.
    pub fn has_curved_rings(&self) -> bool {
        std::iter::once(&self.exterior)
            .chain(&self.interiors)
            .any(Curve::is_curved)
    }

    /// Returns true if the linearization with the polygon's own tolerance has already been computed.
    pub fn is_linearized(&self) -> bool {
        self.linearized.is_initialized()
    }

    pub(crate) fn linearize_unchecked(&self, tolerance: f64) -> Polygon<f64> {
        Polygon::new(
            self.exterior.linearize_unchecked(tolerance),
            self.interiors
                .iter()
                .map(|ring| ring.linearize_unchecked(tolerance))
                .collect(),
        )
    }

    pub(crate) fn write_rings(&self, out: &mut String) {
        if self.exterior.is_empty() {
            out.push_str(text::EMPTY);
            return;
        }

        out.push('(');
        self.exterior.write_text(out);
        for ring in &self.interiors {
            out.push_str(", ");
            ring.write_text(out);
        }
        out.push(')');
    }
}

fn validate_ring(ring: &Curve) -> Result<(), CurveError> {
    if ring.is_empty() {
        return Ok(());
    }

    if let Curve::Straight(line) = ring {
        if line.0.len() < 4 {
            return Err(CurveError::InvalidComponent(format!(
                "straight ring must have at least 4 points: {}",
                ring.to_text()
            )));
        }
    }

    if !ring.is_closed() {
        return Err(CurveError::RingNotClosed(ring.to_text()));
    }

    Ok(())
}

impl PartialEq for CurvePolygon {
    fn eq(&self, other: &Self) -> bool {
        self.exterior == other.exterior
            && self.interiors == other.interiors
            && tolerance_equals(self.tolerance, other.tolerance)
    }
}

impl CurvedGeometry for CurvePolygon {
    type Linearized = Polygon<f64>;

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn linearize(&self) -> Arc<Polygon<f64>> {
        self.linearized
            .get_or_init(|| self.linearize_unchecked(self.tolerance))
    }

    fn linearize_with(&self, tolerance: f64) -> Result<Arc<Polygon<f64>>, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        if tolerance_equals(tolerance, self.tolerance) {
            return Ok(self.linearize());
        }

        Ok(Arc::new(self.linearize_unchecked(tolerance)))
    }

    fn write_curved_text(&self, out: &mut String) {
        out.push_str("CURVEPOLYGON ");
        self.write_rings(out);
    }

    fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    fn envelope(&self) -> Option<Envelope> {
        self.exterior.envelope()
    }

    fn coordinate_dimension(&self) -> usize {
        std::iter::once(&self.exterior)
            .chain(&self.interiors)
            .map(Curve::coordinate_dimension)
            .min()
            .unwrap_or(2)
    }
}

impl From<CurvePolygon> for Geometry<f64> {
    fn from(value: CurvePolygon) -> Self {
        Geometry::Polygon((*value.linearize()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circular_string::CircularString;
    use crate::compound_curve::CompoundCurve;
    use crate::geometry::Geom;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use geo_types::coord;
    use std::f64::consts::PI;

    fn circle(cx: f64, cy: f64, r: f64) -> Curve {
        CircularString::new(
            vec![cx - r, cy, cx, cy + r, cx + r, cy, cx, cy - r, cx - r, cy],
            0.001,
        )
        .unwrap()
        .into()
    }

    fn square_ring() -> Curve {
        LineString::from(vec![(-5.0, -5.0), (5.0, -5.0), (5.0, 5.0), (-5.0, 5.0), (-5.0, -5.0)]).into()
    }

    #[test]
    fn circle_with_square_hole() {
        let hole: Curve =
            LineString::from(vec![(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5), (-0.5, -0.5)])
                .into();
        let polygon = CurvePolygon::new(circle(0.0, 0.0, 2.0), vec![hole], 0.001).unwrap();

        assert!(polygon.has_curved_rings());
        assert_eq!(polygon.num_interior_rings(), 1);
        assert_abs_diff_eq!(polygon.area(), 4.0 * PI - 1.0, epsilon = 0.01);

        let linear = polygon.linearize();
        assert_eq!(linear.interiors().len(), 1);
        assert_eq!(linear.interiors()[0].0.len(), 5);
        assert!(Arc::ptr_eq(&linear, &polygon.linearize()));

        assert!(polygon.is_point_inside(&coord! { x: 1.5, y: 0.0 }, 0.0));
        assert!(!polygon.is_point_inside(&coord! { x: 0.0, y: 0.0 }, 0.0));
    }

    #[test]
    fn straight_rings_pass_through() {
        let polygon = CurvePolygon::new(square_ring(), vec![circle(0.0, 0.0, 1.0)], 0.01).unwrap();
        let linear = polygon.linearize_with(0.1).unwrap();

        assert_eq!(linear.exterior(), &square_ring().linearize());
        assert!(linear.interiors()[0].0.len() > 5);
        assert!(!polygon.is_linearized());
    }

    #[test]
    fn rings_must_be_closed() {
        let open = CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 0.1).unwrap();
        assert_matches!(
            CurvePolygon::new(open.into(), vec![], 0.1),
            Err(CurveError::RingNotClosed(text)) if text == "CIRCULARSTRING (0.0 0.0, 1.0 1.0, 2.0 0.0)"
        );

        let short: Curve = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]).into();
        assert_matches!(
            CurvePolygon::new(short, vec![], 0.1),
            Err(CurveError::InvalidComponent(_))
        );

        assert_matches!(
            CurvePolygon::new(
                LineString::<f64>::new(vec![]).into(),
                vec![square_ring()],
                0.1
            ),
            Err(CurveError::InvalidComponent(_))
        );
    }

    #[test]
    fn compound_ring() {
        let ring = CompoundCurve::new(
            vec![
                CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 0.01)
                    .unwrap()
                    .into(),
                LineString::from(vec![(2.0, 0.0), (0.0, 0.0)]).into(),
            ],
            0.01,
        )
        .unwrap();
        let polygon = CurvePolygon::new(ring.into(), vec![], 0.01).unwrap();

        assert_abs_diff_eq!(polygon.area(), PI / 2.0, epsilon = 0.02);
        assert_eq!(
            polygon.to_curved_text(),
            "CURVEPOLYGON (COMPOUNDCURVE (CIRCULARSTRING (0.0 0.0, 1.0 1.0, 2.0 0.0), (2.0 0.0, 0.0 0.0)))"
        );
        assert_eq!(polygon.envelope(), Some(Envelope::new(0.0, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn text() {
        let polygon = CurvePolygon::new(square_ring(), vec![circle(0.0, 0.0, 1.0)], 0.01).unwrap();
        assert_eq!(
            polygon.to_curved_text(),
            "CURVEPOLYGON ((-5.0 -5.0, 5.0 -5.0, 5.0 5.0, -5.0 5.0, -5.0 -5.0), \
             CIRCULARSTRING (-1.0 0.0, 0.0 1.0, 1.0 0.0, 0.0 -1.0, -1.0 0.0))"
        );
        assert_eq!(
            CurvePolygon::empty(0.1).unwrap().to_curved_text(),
            "CURVEPOLYGON EMPTY"
        );
    }

    #[test]
    fn reverse_and_equality() {
        let polygon = CurvePolygon::new(circle(0.0, 0.0, 1.0), vec![], 0.01).unwrap();
        let reversed = polygon.reverse();

        assert_ne!(reversed, polygon);
        assert_eq!(reversed.reverse(), polygon);
        assert!(polygon.equals(&Geom::from(polygon.clone())));
    }
}
