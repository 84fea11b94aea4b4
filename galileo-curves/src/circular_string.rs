use std::sync::Arc;

use geo_types::{coord, Coord, Geometry, LineString};

use crate::arc::{tolerance_equals, validate_tolerance, Arcs, CircularArc};
use crate::cache::LinearizationCache;
use crate::curved::{CurvedGeometry, SingleCurvedGeometry};
use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::geometry::Geom;
use crate::ordinates::OrdinateBuffer;
use crate::text;

/// A line made of one or more circular arcs. Every arc after the first one starts at the end of the previous one.
///
/// Control points are stored as a flat array of interleaved x and y ordinates. The number of points is 0 (empty
/// string), 3 (one arc) or any odd number above 3 (each additional arc adds two points).
///
/// Most of the geometric operations (length, area, topological predicates etc.) are computed on the
/// [linearization](CurvedGeometry::linearize) of the string made with its own tolerance. Envelope, reversal,
/// closeness check and text output work with the control points directly.
#[derive(Debug, Clone)]
pub struct CircularString {
    control_points: Vec<f64>,
    tolerance: f64,
    linearized: LinearizationCache<LineString<f64>>,
}

impl CircularString {
    /// Creates a new circular string from interleaved `x, y` ordinates.
    pub fn new(control_points: Vec<f64>, tolerance: f64) -> Result<Self, CurveError> {
        if control_points.len() % 2 != 0 {
            return Err(CurveError::OddOrdinateCount(control_points.len()));
        }

        let point_count = control_points.len() / 2;
        if point_count != 0 && (point_count < 3 || point_count % 2 == 0) {
            return Err(CurveError::InvalidPointCount(point_count));
        }

        for chunk in control_points.windows(6).step_by(4) {
            CircularArc::from_ordinates(chunk)?;
        }

        Ok(Self {
            control_points,
            tolerance: validate_tolerance(tolerance)?,
            linearized: LinearizationCache::new(),
        })
    }

    /// Creates a new circular string from a flat ordinate array with the given number of ordinates per point.
    ///
    /// Only 2d coordinates are supported, any other dimension results in an error.
    pub fn from_ordinates(
        ordinates: Vec<f64>,
        dimension: usize,
        tolerance: f64,
    ) -> Result<Self, CurveError> {
        if dimension != 2 {
            return Err(CurveError::UnsupportedDimension(dimension));
        }

        Self::new(ordinates, tolerance)
    }

    /// Creates a new circular string from coordinates.
    pub fn from_coords(coords: &[Coord<f64>], tolerance: f64) -> Result<Self, CurveError> {
        let mut buffer = OrdinateBuffer::with_capacity(coords.len());
        for c in coords {
            buffer.add_coord(*c);
        }

        Self::new(buffer.into_ordinates(), tolerance)
    }

    /// Creates a circular string without any points.
    pub fn empty(tolerance: f64) -> Result<Self, CurveError> {
        Self::new(vec![], tolerance)
    }

    /// Number of control points.
    pub fn num_points(&self) -> usize {
        self.control_points.len() / 2
    }

    /// Control point with the given index.
    pub fn point_n(&self, index: usize) -> Option<Coord<f64>> {
        let o = self.control_points.get(index * 2..index * 2 + 2)?;
        Some(coord! { x: o[0], y: o[1] })
    }

    /// First control point.
    pub fn start_point(&self) -> Option<Coord<f64>> {
        self.point_n(0)
    }

    /// Last control point.
    pub fn end_point(&self) -> Option<Coord<f64>> {
        self.point_n(self.num_points().checked_sub(1)?)
    }

    /// Returns true if the first and the last control points have exactly the same ordinates.
    pub fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    /// Returns a new string going through the same points in the opposite direction.
    pub fn reverse(&self) -> Self {
        let mut buffer = OrdinateBuffer::from(self.control_points.clone());
        buffer.reverse(0, self.num_points());

        Self {
            control_points: buffer.into_ordinates(),
            tolerance: self.tolerance,
            linearized: LinearizationCache::new(),
        }
    }

    /// The control point in the middle of the string.
    ///
    /// This is a point lying on the curve, though not necessarily in the middle of its length.
    pub fn interior_point(&self) -> Option<Coord<f64>> {
        self.point_n(self.num_points() / 2)
    }

    /// Returns true if the linearization with the string's own tolerance has already been computed.
    pub fn is_linearized(&self) -> bool {
        self.linearized.is_initialized()
    }

    fn linearize_unchecked(&self, tolerance: f64) -> LineString<f64> {
        let mut buffer = OrdinateBuffer::new();
        self.append_linearized(tolerance, &mut buffer);
        buffer.into_line_string()
    }

    // Appends sampled points of all the arcs. The point shared by two consecutive arcs is written once.
    pub(crate) fn append_linearized(&self, tolerance: f64, buffer: &mut OrdinateBuffer) {
        for (i, arc) in self.arcs().enumerate() {
            if i > 0 {
                buffer.drop_last_point();
            }
            arc.sample_into(tolerance, buffer);
        }
    }

    /// Structural equality with another geometry within `tolerance`.
    ///
    /// Two circular strings with exactly the same control points are equal without linearizing them. Otherwise the
    /// linearizations of both geometries are compared vertex by vertex.
    pub fn equals_exact(&self, other: &Geom, tolerance: f64) -> bool {
        if let Geom::CircularString(other) = other {
            if self.control_points == other.control_points {
                return true;
            }
        }

        crate::planar::equals_exact(&self.linear_geometry(), &other.linearize(), tolerance)
    }

    pub(crate) fn has_same_control_points(&self, other: &Self) -> bool {
        self.control_points == other.control_points
    }
}

impl PartialEq for CircularString {
    fn eq(&self, other: &Self) -> bool {
        self.control_points == other.control_points && tolerance_equals(self.tolerance, other.tolerance)
    }
}

impl CurvedGeometry for CircularString {
    type Linearized = LineString<f64>;

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn linearize(&self) -> Arc<LineString<f64>> {
        self.linearized
            .get_or_init(|| self.linearize_unchecked(self.tolerance))
    }

    fn linearize_with(&self, tolerance: f64) -> Result<Arc<LineString<f64>>, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        if tolerance_equals(tolerance, self.tolerance) {
            return Ok(self.linearize());
        }

        Ok(Arc::new(self.linearize_unchecked(tolerance)))
    }

    fn write_curved_text(&self, out: &mut String) {
        out.push_str("CIRCULARSTRING ");
        if self.control_points.is_empty() {
            out.push_str(text::EMPTY);
        } else {
            text::write_ordinate_list(out, &self.control_points);
        }
    }

    fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    fn envelope(&self) -> Option<Envelope> {
        let mut envelope = Envelope::from_coord(self.start_point()?);
        for arc in self.arcs() {
            arc.expand_envelope(&mut envelope);
        }

        Some(envelope)
    }

    fn equals_topo(&self, other: &Geom) -> bool {
        if let Geom::CircularString(other) = other {
            if self.has_same_control_points(other) {
                return true;
            }
        }

        crate::planar::equals_topo(&self.linear_geometry(), &other.linearize())
    }
}

impl SingleCurvedGeometry for CircularString {
    fn control_points(&self) -> &[f64] {
        &self.control_points
    }

    fn arcs(&self) -> Arcs<'_> {
        Arcs::new(&self.control_points)
    }

    fn linearize_into(&self, tolerance: f64, buffer: &mut OrdinateBuffer) -> Result<(), CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        self.append_linearized(tolerance, buffer);
        Ok(())
    }
}

impl From<CircularString> for Geometry<f64> {
    fn from(value: CircularString) -> Self {
        Geometry::LineString((*value.linearize()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use std::f64::consts::PI;

    fn half_circle() -> CircularString {
        CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 0.001).unwrap()
    }

    fn s_curve() -> CircularString {
        CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, -1.0, 4.0, 0.0], 0.001)
            .unwrap()
    }

    #[test]
    fn point_count_validation() {
        let points = |n: usize| (0..n * 2).map(|i| i as f64 * (i % 3) as f64).collect::<Vec<_>>();

        for n in [1, 2, 4, 6] {
            assert_matches!(
                CircularString::new(points(n), 0.1),
                Err(CurveError::InvalidPointCount(count)) if count == n
            );
        }
        assert!(CircularString::new(vec![], 0.1).is_ok());
        assert_matches!(
            CircularString::new(vec![0.0, 0.0, 1.0], 0.1),
            Err(CurveError::OddOrdinateCount(3))
        );
        assert_matches!(
            CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0], 0.1),
            Err(CurveError::DegenerateArc { .. })
        );
        assert_matches!(
            CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], -0.1),
            Err(CurveError::InvalidTolerance(_))
        );
    }

    #[test]
    fn only_2d_is_supported() {
        assert_matches!(
            CircularString::from_ordinates(vec![0.0; 9], 3, 0.1),
            Err(CurveError::UnsupportedDimension(3))
        );
        assert!(CircularString::from_ordinates(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 2, 0.1).is_ok());
    }

    #[test]
    fn linearize_stitches_arcs() {
        let curve = s_curve();
        let line = curve.linearize();

        assert_eq!(line.0[0], coord! { x: 0.0, y: 0.0 });
        assert_eq!(*line.0.last().unwrap(), coord! { x: 4.0, y: 0.0 });

        let joints = line.0.iter().filter(|c| **c == coord! { x: 2.0, y: 0.0 }).count();
        assert_eq!(joints, 1);
        assert!(line.0.windows(2).all(|pair| pair[0] != pair[1]));

        let first_arc = curve.arcs().next().unwrap().linearize(0.001).unwrap();
        let second_arc = curve.arcs().nth(1).unwrap().linearize(0.001).unwrap();
        assert_eq!(line.0.len(), first_arc.0.len() + second_arc.0.len() - 1);
    }

    #[test]
    fn linearize_is_cached_for_own_tolerance_only() {
        let curve = half_circle();
        assert!(!curve.is_linearized());

        let first = curve.linearize();
        let second = curve.linearize();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(curve.is_linearized());

        let coarse = curve.linearize_with(0.1).unwrap();
        assert!(coarse.0.len() < first.0.len());
        assert!(Arc::ptr_eq(&first, &curve.linearize()));

        assert!(!Arc::ptr_eq(&coarse, &curve.linearize_with(0.1).unwrap()));
    }

    #[test]
    fn own_tolerance_goes_through_cache() {
        let curve = half_circle();
        let same = curve.linearize_with(curve.tolerance()).unwrap();
        assert!(curve.is_linearized());
        assert!(Arc::ptr_eq(&same, &curve.linearize()));

        let other = half_circle();
        let nearly_same = other.linearize_with(0.001 + 1e-15).unwrap();
        assert!(other.is_linearized());
        assert!(Arc::ptr_eq(&nearly_same, &other.linearize()));
    }

    #[test]
    fn huge_ordinates_linearize() {
        let curve = CircularString::new(vec![0.0, 0.0, 1e110, 1e110, 2e110, 0.0], 0.001).unwrap();
        assert_eq!(curve.linearize().0.len(), 3);
        assert!(curve.length().is_finite());
    }

    #[test]
    fn delegated_measures() {
        let curve = half_circle();
        assert_abs_diff_eq!(curve.length(), PI, epsilon = 0.01);
        assert_eq!(curve.area(), 0.0);
        assert!(curve.num_points() == 3);
        assert!(curve.linearize().0.len() > 3);
    }

    #[test]
    fn closed_and_empty() {
        let empty = CircularString::empty(0.1).unwrap();
        assert!(empty.is_empty());
        assert!(!empty.is_closed());
        assert_eq!(empty.envelope(), None);
        assert_eq!(empty.interior_point(), None);
        assert!(empty.linearize().0.is_empty());

        let circle =
            CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 1.0, -1.0, 0.0, 0.0], 0.1)
                .unwrap();
        assert!(circle.is_closed());
        assert!(!half_circle().is_closed());
    }

    #[test]
    fn reverse_reverses_points() {
        let curve = s_curve();
        let reversed = curve.reverse();
        assert_eq!(
            reversed.control_points(),
            &[4.0, 0.0, 3.0, -1.0, 2.0, 0.0, 1.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(reversed.reverse().control_points(), curve.control_points());
        assert_eq!(reversed.tolerance(), curve.tolerance());
    }

    #[test]
    fn interior_point_is_middle_control_point() {
        assert_eq!(s_curve().interior_point(), Some(coord! { x: 2.0, y: 0.0 }));
        assert_eq!(half_circle().interior_point(), Some(coord! { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn envelope_uses_arcs() {
        let envelope = s_curve().envelope().unwrap();
        assert_abs_diff_eq!(envelope.x_min(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.x_max(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.y_min(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.y_max(), 1.0, epsilon = 1e-12);

        let quarter = CircularString::new(
            vec![0.0, 1.0, 0.5f64.sqrt(), 0.5f64.sqrt(), 1.0, 0.0],
            0.1,
        )
        .unwrap();
        let envelope = quarter.envelope().unwrap();
        assert_abs_diff_eq!(envelope.y_max(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.x_max(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn text() {
        assert_eq!(
            half_circle().to_curved_text(),
            "CIRCULARSTRING (0.0 0.0, 1.0 1.0, 2.0 0.0)"
        );
        assert_eq!(
            CircularString::empty(0.1).unwrap().to_curved_text(),
            "CIRCULARSTRING EMPTY"
        );
    }

    #[test]
    fn equality_fast_path_does_not_linearize() {
        let a = half_circle();
        let b = half_circle();

        assert!(a.equals_exact(&Geom::from(b.clone()), 0.0));
        assert!(a.equals_topo(&Geom::from(b.clone())));
        assert!(a.equals(&Geom::from(b.clone())));
        assert!(!a.is_linearized());
        assert!(!b.is_linearized());
        assert_eq!(a, b);
    }

    #[test]
    fn equality_falls_back_to_linearization() {
        let a = CircularString::new(vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0], 0.1).unwrap();
        let b = CircularString::new(vec![0.0, 0.0, 0.5, 0.0, 2.0, 0.0], 0.1).unwrap();
        let line = Geom::from(LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]));

        assert!(a.equals(&Geom::from(b.clone())));
        assert!(a.equals_topo(&line));
        assert!(!a.equals_exact(&Geom::from(b.clone()), 0.0));
        assert!(a.equals_exact(&Geom::from(b), 0.5));
        assert!(!a.equals_exact(&line, 0.0));
        assert!(a.is_linearized());
    }
}
