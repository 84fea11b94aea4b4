use geo_types::{Geometry, LineString, MultiLineString, MultiPolygon, Point, Polygon};

use crate::circular_string::CircularString;
use crate::compound_curve::CompoundCurve;
use crate::curve::Curve;
use crate::curve_polygon::CurvePolygon;
use crate::curved::CurvedGeometry;
use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::multi_curve::MultiCurve;
use crate::multi_surface::MultiSurface;
use crate::planar;
use crate::surface::Surface;

/// Any geometry: either a standard planar one or one of the curved types.
///
/// Used as the other side of binary operations (equality, topological predicates) on curved geometries.
#[derive(Debug, Clone, PartialEq)]
pub enum Geom {
    /// Standard geometry without curves.
    Planar(Geometry<f64>),
    /// See [`CircularString`].
    CircularString(CircularString),
    /// See [`CompoundCurve`].
    CompoundCurve(CompoundCurve),
    /// See [`CurvePolygon`].
    CurvePolygon(CurvePolygon),
    /// See [`MultiCurve`].
    MultiCurve(MultiCurve),
    /// See [`MultiSurface`].
    MultiSurface(MultiSurface),
}

impl Geom {
    /// Returns true if the geometry is one of the curved types.
    pub fn is_curved(&self) -> bool {
        !matches!(self, Geom::Planar(_))
    }

    /// Linearization with the geometry's own tolerance. Planar geometries are returned as is.
    pub fn linearize(&self) -> Geometry<f64> {
        match self {
            Geom::Planar(v) => v.clone(),
            Geom::CircularString(v) => v.linear_geometry(),
            Geom::CompoundCurve(v) => v.linear_geometry(),
            Geom::CurvePolygon(v) => v.linear_geometry(),
            Geom::MultiCurve(v) => v.linear_geometry(),
            Geom::MultiSurface(v) => v.linear_geometry(),
        }
    }

    /// Linearization with the given tolerance. Planar geometries are returned as is.
    pub fn linearize_with(&self, tolerance: f64) -> Result<Geometry<f64>, CurveError> {
        Ok(match self {
            Geom::Planar(v) => v.clone(),
            Geom::CircularString(v) => (*v.linearize_with(tolerance)?).clone().into(),
            Geom::CompoundCurve(v) => (*v.linearize_with(tolerance)?).clone().into(),
            Geom::CurvePolygon(v) => (*v.linearize_with(tolerance)?).clone().into(),
            Geom::MultiCurve(v) => (*v.linearize_with(tolerance)?).clone().into(),
            Geom::MultiSurface(v) => (*v.linearize_with(tolerance)?).clone().into(),
        })
    }

    /// Curve aware text of a curved geometry. `None` for planar geometries.
    pub fn to_curved_text(&self) -> Option<String> {
        match self {
            Geom::Planar(_) => None,
            Geom::CircularString(v) => Some(v.to_curved_text()),
            Geom::CompoundCurve(v) => Some(v.to_curved_text()),
            Geom::CurvePolygon(v) => Some(v.to_curved_text()),
            Geom::MultiCurve(v) => Some(v.to_curved_text()),
            Geom::MultiSurface(v) => Some(v.to_curved_text()),
        }
    }

    /// Bounding box. For curved geometries this is the box of the exact curves.
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Geom::Planar(v) => geo::BoundingRect::bounding_rect(v).map(Envelope::from),
            Geom::CircularString(v) => v.envelope(),
            Geom::CompoundCurve(v) => v.envelope(),
            Geom::CurvePolygon(v) => v.envelope(),
            Geom::MultiCurve(v) => v.envelope(),
            Geom::MultiSurface(v) => v.envelope(),
        }
    }

    /// Structural equality within `tolerance`, using the fast paths of curved types where possible.
    pub fn equals_exact(&self, other: &Geom, tolerance: f64) -> bool {
        match self {
            Geom::CircularString(v) => v.equals_exact(other, tolerance),
            Geom::CompoundCurve(v) => v.equals_exact(other, tolerance),
            _ => planar::equals_exact(&self.linearize(), &other.linearize(), tolerance),
        }
    }

    /// Topological equality, using the fast paths of curved types where possible.
    pub fn equals_topo(&self, other: &Geom) -> bool {
        match self {
            Geom::Planar(v) => planar::equals_topo(v, &other.linearize()),
            Geom::CircularString(v) => v.equals_topo(other),
            Geom::CompoundCurve(v) => v.equals_topo(other),
            Geom::CurvePolygon(v) => v.equals_topo(other),
            Geom::MultiCurve(v) => v.equals_topo(other),
            Geom::MultiSurface(v) => v.equals_topo(other),
        }
    }
}

impl From<Geometry<f64>> for Geom {
    fn from(value: Geometry<f64>) -> Self {
        Self::Planar(value)
    }
}

impl From<Point<f64>> for Geom {
    fn from(value: Point<f64>) -> Self {
        Self::Planar(value.into())
    }
}

impl From<LineString<f64>> for Geom {
    fn from(value: LineString<f64>) -> Self {
        Self::Planar(value.into())
    }
}

impl From<Polygon<f64>> for Geom {
    fn from(value: Polygon<f64>) -> Self {
        Self::Planar(value.into())
    }
}

impl From<MultiLineString<f64>> for Geom {
    fn from(value: MultiLineString<f64>) -> Self {
        Self::Planar(value.into())
    }
}

impl From<MultiPolygon<f64>> for Geom {
    fn from(value: MultiPolygon<f64>) -> Self {
        Self::Planar(value.into())
    }
}

impl From<CircularString> for Geom {
    fn from(value: CircularString) -> Self {
        Self::CircularString(value)
    }
}

impl From<CompoundCurve> for Geom {
    fn from(value: CompoundCurve) -> Self {
        Self::CompoundCurve(value)
    }
}

impl From<CurvePolygon> for Geom {
    fn from(value: CurvePolygon) -> Self {
        Self::CurvePolygon(value)
    }
}

impl From<MultiCurve> for Geom {
    fn from(value: MultiCurve) -> Self {
        Self::MultiCurve(value)
    }
}

impl From<MultiSurface> for Geom {
    fn from(value: MultiSurface) -> Self {
        Self::MultiSurface(value)
    }
}

impl From<Curve> for Geom {
    fn from(value: Curve) -> Self {
        match value {
            Curve::Straight(v) => v.into(),
            Curve::Circular(v) => v.into(),
            Curve::Compound(v) => v.into(),
        }
    }
}

impl From<Surface> for Geom {
    fn from(value: Surface) -> Self {
        match value {
            Surface::Straight(v) => v.into(),
            Surface::Curved(v) => v.into(),
        }
    }
}

impl From<Geom> for Geometry<f64> {
    fn from(value: Geom) -> Self {
        match value {
            Geom::Planar(v) => v,
            curved => curved.linearize(),
        }
    }
}
