use std::sync::Arc;

use geo_types::{Geometry, MultiPolygon};

use crate::arc::{tolerance_equals, validate_tolerance};
use crate::cache::LinearizationCache;
use crate::curved::{CurvedGeometry, MultiCurvedGeometry};
use crate::envelope::{merge_all, Envelope};
use crate::error::CurveError;
use crate::surface::Surface;
use crate::text;

/// Collection of polygons, some of which may have curved rings.
#[derive(Debug, Clone)]
pub struct MultiSurface {
    members: Vec<Surface>,
    tolerance: f64,
    linearized: LinearizationCache<MultiPolygon<f64>>,
}

impl MultiSurface {
    /// Creates a new collection.
    pub fn new(members: Vec<Surface>, tolerance: f64) -> Result<Self, CurveError> {
        Ok(Self {
            members,
            tolerance: validate_tolerance(tolerance)?,
            linearized: LinearizationCache::new(),
        })
    }

    /// Members of the collection.
    pub fn members(&self) -> &[Surface] {
        &self.members
    }

    /// Collection with every ring of every member reversed.
    pub fn reverse(&self) -> Self {
        Self {
            members: self.members.iter().map(Surface::reverse).collect(),
            tolerance: self.tolerance,
            linearized: LinearizationCache::new(),
        }
    }

    /// Returns true if the linearization with the collection's own tolerance has already been computed.
    pub fn is_linearized(&self) -> bool {
        self.linearized.is_initialized()
    }

    fn linearize_unchecked(&self, tolerance: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(
            self.members
                .iter()
                .map(|member| member.linearize_unchecked(tolerance))
                .collect(),
        )
    }
}

impl PartialEq for MultiSurface {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members && tolerance_equals(self.tolerance, other.tolerance)
    }
}

impl CurvedGeometry for MultiSurface {
    type Linearized = MultiPolygon<f64>;

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn linearize(&self) -> Arc<MultiPolygon<f64>> {
        self.linearized
            .get_or_init(|| self.linearize_unchecked(self.tolerance))
    }

    fn linearize_with(&self, tolerance: f64) -> Result<Arc<MultiPolygon<f64>>, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        if tolerance_equals(tolerance, self.tolerance) {
            return Ok(self.linearize());
        }

        Ok(Arc::new(self.linearize_unchecked(tolerance)))
    }

    fn write_curved_text(&self, out: &mut String) {
        let members: &[Surface] = if self.is_empty() { &[] } else { &self.members };
        text::write_tagged(out, "MULTISURFACE", members, |out, member| {
            member.write_text(out)
        });
    }

    fn is_empty(&self) -> bool {
        self.members.iter().all(Surface::is_empty)
    }

    fn envelope(&self) -> Option<Envelope> {
        merge_all(self.members.iter().map(Surface::envelope))
    }

    fn coordinate_dimension(&self) -> usize {
        self.members
            .iter()
            .map(Surface::coordinate_dimension)
            .min()
            .unwrap_or(2)
    }
}

impl MultiCurvedGeometry for MultiSurface {
    fn num_members(&self) -> usize {
        self.members.len()
    }
}

impl From<MultiSurface> for Geometry<f64> {
    fn from(value: MultiSurface) -> Self {
        Geometry::MultiPolygon((*value.linearize()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circular_string::CircularString;
    use crate::curve_polygon::CurvePolygon;
    use approx::assert_abs_diff_eq;
    use geo_types::{LineString, Polygon};
    use std::f64::consts::PI;

    fn members() -> Vec<Surface> {
        let circle = CircularString::new(
            vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, -1.0, -1.0, 0.0],
            0.0001,
        )
        .unwrap();
        vec![
            CurvePolygon::new(circle.into(), vec![], 0.0001)
                .unwrap()
                .into(),
            Polygon::new(
                LineString::from(vec![(3.0, 0.0), (4.0, 0.0), (4.0, 1.0), (3.0, 0.0)]),
                vec![],
            )
            .into(),
        ]
    }

    #[test]
    fn linearize_member_wise() {
        let multi = MultiSurface::new(members(), 0.0001).unwrap();
        let linear = multi.linearize();

        assert_eq!(linear.0.len(), 2);
        assert_eq!(linear.0[1].exterior().0.len(), 4);
        assert_abs_diff_eq!(multi.area(), PI + 0.5, epsilon = 0.01);
        assert!(Arc::ptr_eq(&linear, &multi.linearize()));

        let coarse = multi.linearize_with(0.1).unwrap();
        assert!(coarse.0[0].exterior().0.len() < linear.0[0].exterior().0.len());
    }

    #[test]
    fn text() {
        let multi = MultiSurface::new(members(), 0.0001).unwrap();
        assert_eq!(
            multi.to_curved_text(),
            "MULTISURFACE (CURVEPOLYGON (CIRCULARSTRING (-1.0 0.0, 0.0 1.0, 1.0 0.0, 0.0 -1.0, -1.0 0.0)), \
             ((3.0 0.0, 4.0 0.0, 4.0 1.0, 3.0 0.0)))"
        );
        assert_eq!(
            MultiSurface::new(vec![], 0.1).unwrap().to_curved_text(),
            "MULTISURFACE EMPTY"
        );
    }

    #[test]
    fn only_empty_members() {
        let empty = Surface::Curved(CurvePolygon::empty(0.1).unwrap());
        let multi = MultiSurface::new(vec![empty], 0.1).unwrap();
        assert!(multi.is_empty());
        assert_eq!(multi.to_curved_text(), "MULTISURFACE EMPTY");
    }

    #[test]
    fn envelope() {
        let multi = MultiSurface::new(members(), 0.0001).unwrap();
        let envelope = multi.envelope().unwrap();
        assert_abs_diff_eq!(envelope.x_min(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.y_min(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.x_max(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(envelope.y_max(), 1.0, epsilon = 1e-12);
        assert_eq!(multi.num_members(), 2);
        assert_eq!(multi.coordinate_dimension(), 2);
    }
}
