//! Capabilities of curved geometries.
//!
//! Every curved type can be approximated by a standard [`geo_types`] geometry: a [`CircularString`] becomes a
//! [`LineString`], a [`CurvePolygon`] becomes a [`Polygon`] and so on. This process is called *linearization*. The
//! approximation is controlled by a *tolerance*: the maximum distance between any chord of the result and the arc
//! it replaces.
//!
//! Apart from a few operations that can be done on control points directly, curved geometries answer metric and
//! topological questions by linearizing themselves with their own tolerance and asking [`geo`] algorithms.
//!
//! [`CircularString`]: crate::CircularString
//! [`CurvePolygon`]: crate::CurvePolygon
//! [`LineString`]: geo_types::LineString
//! [`Polygon`]: geo_types::Polygon

use std::sync::Arc;

use geo::relate::IntersectionMatrix;
use geo::{Area, Centroid, ConvexHull, CoordsIter, Relate};
use geo_types::{Coord, Geometry, Point, Polygon};

use crate::arc::Arcs;
use crate::curve::Curve;
use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::geometry::Geom;
use crate::ordinates::OrdinateBuffer;
use crate::planar;

/// A geometry that can be linearized and written as curve aware text.
pub trait CurvedGeometry {
    /// Standard geometry type this one is approximated with.
    type Linearized: Clone + Into<Geometry<f64>>;

    /// Tolerance the geometry was created with. Used by [`CurvedGeometry::linearize`].
    fn tolerance(&self) -> f64;

    /// Linearization with the geometry's own tolerance.
    ///
    /// The result is computed once and then the same instance is returned on every call.
    fn linearize(&self) -> Arc<Self::Linearized>;

    /// Linearization with the given tolerance.
    ///
    /// If the tolerance is the geometry's own one (see [`tolerance_equals`](crate::tolerance_equals)), this is the
    /// same as [`CurvedGeometry::linearize`]. Results for other tolerances are never cached.
    fn linearize_with(&self, tolerance: f64) -> Result<Arc<Self::Linearized>, CurveError>;

    /// Appends the curve aware text of the geometry to the string.
    fn write_curved_text(&self, out: &mut String);

    /// Text representation, e.g. `CIRCULARSTRING (0.0 0.0, 1.0 1.0, 2.0 0.0)`.
    fn to_curved_text(&self) -> String {
        let mut out = String::new();
        self.write_curved_text(&mut out);
        out
    }

    /// Returns true if the geometry has no points.
    fn is_empty(&self) -> bool;

    /// Bounding box of the exact curved geometry, `None` if the geometry is empty.
    fn envelope(&self) -> Option<Envelope>;

    /// Number of ordinates per point. Only 2d geometries can be created, so this is always 2 at the moment.
    fn coordinate_dimension(&self) -> usize {
        2
    }

    /// Linearization as a generic planar geometry.
    fn linear_geometry(&self) -> Geometry<f64> {
        (*self.linearize()).clone().into()
    }

    /// Length of the linearized geometry (perimeter for polygons).
    fn length(&self) -> f64 {
        planar::length(&self.linear_geometry())
    }

    /// Area of the linearized geometry.
    fn area(&self) -> f64 {
        self.linear_geometry().unsigned_area()
    }

    /// Centroid of the linearized geometry.
    fn centroid(&self) -> Option<Point<f64>> {
        self.linear_geometry().centroid()
    }

    /// Convex hull of the linearized geometry.
    fn convex_hull(&self) -> Polygon<f64> {
        self.linear_geometry().convex_hull()
    }

    /// Number of vertices of the linearized geometry.
    fn num_linearized_points(&self) -> usize {
        self.linear_geometry().coords_count()
    }

    /// Vertices of the linearized geometry.
    fn linearized_coords(&self) -> Vec<Coord<f64>> {
        self.linear_geometry().coords_iter().collect()
    }

    /// DE-9IM matrix between linearizations of the two geometries.
    fn relate(&self, other: &Geom) -> IntersectionMatrix {
        self.linear_geometry().relate(&other.linearize())
    }

    /// Returns true if the geometries have at least one common point.
    fn intersects(&self, other: &Geom) -> bool {
        self.relate(other).is_intersects()
    }

    /// Returns true if no point of `other` lies outside of this geometry and their interiors intersect.
    fn contains(&self, other: &Geom) -> bool {
        self.relate(other).is_contains()
    }

    /// Returns true if this geometry lies inside of `other`.
    fn within(&self, other: &Geom) -> bool {
        self.relate(other).is_within()
    }

    /// Distance from the point to the closest line of the linearized geometry.
    fn distance_to_point(&self, point: &Coord<f64>) -> Option<f64> {
        planar::distance_to_point(&self.linear_geometry(), point)
    }

    /// Returns true if the point is inside the area of the geometry or not farther than `tolerance` from its lines.
    fn is_point_inside(&self, point: &Coord<f64>, tolerance: f64) -> bool {
        planar::is_point_inside(&self.linear_geometry(), point, tolerance)
    }

    /// Topological equality.
    fn equals_topo(&self, other: &Geom) -> bool {
        planar::equals_topo(&self.linear_geometry(), &other.linearize())
    }

    /// Same as [`CurvedGeometry::equals_topo`].
    fn equals(&self, other: &Geom) -> bool {
        self.equals_topo(other)
    }
}

/// A single connected curve defined by control points, like [`CircularString`](crate::CircularString).
pub trait SingleCurvedGeometry: CurvedGeometry {
    /// Control points as interleaved `x, y` ordinates.
    fn control_points(&self) -> &[f64];

    /// Iterates over the arcs of the curve.
    fn arcs(&self) -> Arcs<'_>;

    /// Number of arcs.
    fn num_arcs(&self) -> usize {
        self.arcs().len()
    }

    /// Arc with the given index.
    fn arc_n(&self, index: usize) -> Option<crate::arc::CircularArc> {
        self.arcs().nth(index)
    }

    /// Appends the linearization with the given tolerance to the buffer.
    fn linearize_into(&self, tolerance: f64, buffer: &mut OrdinateBuffer) -> Result<(), CurveError>;
}

/// A curve made of several connected pieces, like [`CompoundCurve`](crate::CompoundCurve).
pub trait CompoundCurvedGeometry: CurvedGeometry {
    /// Pieces of the curve in order.
    fn components(&self) -> &[Curve];
}

/// A collection of geometries some of which may be curved.
pub trait MultiCurvedGeometry: CurvedGeometry {
    /// Number of members of the collection.
    fn num_members(&self) -> usize;
}
