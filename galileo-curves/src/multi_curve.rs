use std::sync::Arc;

use geo_types::{Geometry, MultiLineString};

use crate::arc::{tolerance_equals, validate_tolerance};
use crate::cache::LinearizationCache;
use crate::curve::Curve;
use crate::curved::{CurvedGeometry, MultiCurvedGeometry};
use crate::envelope::{merge_all, Envelope};
use crate::error::CurveError;
use crate::text;

/// Collection of lines, some of which may be curved.
#[derive(Debug, Clone)]
pub struct MultiCurve {
    members: Vec<Curve>,
    tolerance: f64,
    linearized: LinearizationCache<MultiLineString<f64>>,
}

impl MultiCurve {
    /// Creates a new collection.
    pub fn new(members: Vec<Curve>, tolerance: f64) -> Result<Self, CurveError> {
        Ok(Self {
            members,
            tolerance: validate_tolerance(tolerance)?,
            linearized: LinearizationCache::new(),
        })
    }

    /// Members of the collection.
    pub fn members(&self) -> &[Curve] {
        &self.members
    }

    /// Returns true if the collection is not empty and every member is closed.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.members.iter().all(Curve::is_closed)
    }

    /// Collection of the reversed members in reverse order.
    pub fn reverse(&self) -> Self {
        Self {
            members: self.members.iter().rev().map(Curve::reverse).collect(),
            tolerance: self.tolerance,
            linearized: LinearizationCache::new(),
        }
    }

    /// Returns true if the linearization with the collection's own tolerance has already been computed.
    pub fn is_linearized(&self) -> bool {
        self.linearized.is_initialized()
    }

    fn linearize_unchecked(&self, tolerance: f64) -> MultiLineString<f64> {
        MultiLineString::new(
            self.members
                .iter()
                .map(|member| member.linearize_unchecked(tolerance))
                .collect(),
        )
    }
}

impl PartialEq for MultiCurve {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members && tolerance_equals(self.tolerance, other.tolerance)
    }
}

impl CurvedGeometry for MultiCurve {
    type Linearized = MultiLineString<f64>;

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn linearize(&self) -> Arc<MultiLineString<f64>> {
        self.linearized
            .get_or_init(|| self.linearize_unchecked(self.tolerance))
    }

    fn linearize_with(&self, tolerance: f64) -> Result<Arc<MultiLineString<f64>>, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        if tolerance_equals(tolerance, self.tolerance) {
            return Ok(self.linearize());
        }

        Ok(Arc::new(self.linearize_unchecked(tolerance)))
    }

    fn write_curved_text(&self, out: &mut String) {
        // A collection of empty members is written the same way as one without members.
        let members: &[Curve] = if self.is_empty() { &[] } else { &self.members };
        text::write_tagged(out, "MULTICURVE", members, |out, member| {
            member.write_text(out)
        });
    }

    fn is_empty(&self) -> bool {
        self.members.iter().all(Curve::is_empty)
    }

    fn envelope(&self) -> Option<Envelope> {
        merge_all(self.members.iter().map(Curve::envelope))
    }

    fn coordinate_dimension(&self) -> usize {
        self.members
            .iter()
            .map(Curve::coordinate_dimension)
            .min()
            .unwrap_or(2)
    }
}

impl MultiCurvedGeometry for MultiCurve {
    fn num_members(&self) -> usize {
        self.members.len()
    }
}

impl From<MultiCurve> for Geometry<f64> {
    fn from(value: MultiCurve) -> Self {
        Geometry::MultiLineString((*value.linearize()).clone())
    }
}
