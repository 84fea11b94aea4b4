use geo_types::Coord;
use serde::{Deserialize, Serialize};

use crate::arc::validate_tolerance;
use crate::circular_string::CircularString;
use crate::compound_curve::CompoundCurve;
use crate::curve::Curve;
use crate::curve_polygon::CurvePolygon;
use crate::error::CurveError;
use crate::multi_curve::MultiCurve;
use crate::multi_surface::MultiSurface;
use crate::surface::Surface;

/// Creates curved geometries sharing the same linearization tolerance.
///
/// The factory can be stored in a configuration file:
///
/// ```json
/// { "tolerance": 0.001 }
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FactoryConfig")]
pub struct CurvedGeometryFactory {
    tolerance: f64,
}

#[derive(Deserialize)]
struct FactoryConfig {
    tolerance: f64,
}

impl TryFrom<FactoryConfig> for CurvedGeometryFactory {
    type Error = CurveError;

    fn try_from(value: FactoryConfig) -> Result<Self, Self::Error> {
        Self::new(value.tolerance)
    }
}

impl CurvedGeometryFactory {
    /// Creates a new factory. The tolerance must not be negative.
    pub fn new(tolerance: f64) -> Result<Self, CurveError> {
        Ok(Self {
            tolerance: validate_tolerance(tolerance)?,
        })
    }

    /// Tolerance given to all created geometries.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// See [`CircularString::new`].
    pub fn circular_string(&self, control_points: Vec<f64>) -> Result<CircularString, CurveError> {
        CircularString::new(control_points, self.tolerance)
    }

    /// See [`CircularString::from_coords`].
    pub fn circular_string_from_coords(
        &self,
        coords: &[Coord<f64>],
    ) -> Result<CircularString, CurveError> {
        CircularString::from_coords(coords, self.tolerance)
    }

    /// See [`CompoundCurve::new`].
    pub fn compound_curve(&self, components: Vec<Curve>) -> Result<CompoundCurve, CurveError> {
        CompoundCurve::new(components, self.tolerance)
    }

    /// Creates a single curve out of connected pieces. One piece is returned as is, several pieces are combined
    /// into a [`CompoundCurve`].
    pub fn curve(&self, mut components: Vec<Curve>) -> Result<Curve, CurveError> {
        if components.len() == 1 {
            if let Some(component) = components.pop() {
                return Ok(component);
            }
        }

        Ok(self.compound_curve(components)?.into())
    }

    /// See [`CurvePolygon::new`].
    pub fn curve_polygon(
        &self,
        exterior: Curve,
        interiors: Vec<Curve>,
    ) -> Result<CurvePolygon, CurveError> {
        CurvePolygon::new(exterior, interiors, self.tolerance)
    }

    /// See [`MultiCurve::new`].
    pub fn multi_curve(&self, members: Vec<Curve>) -> Result<MultiCurve, CurveError> {
        MultiCurve::new(members, self.tolerance)
    }

    /// See [`MultiSurface::new`].
    pub fn multi_surface(&self, members: Vec<Surface>) -> Result<MultiSurface, CurveError> {
        MultiSurface::new(members, self.tolerance)
    }
}
