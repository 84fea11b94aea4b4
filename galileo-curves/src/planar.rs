//! Operations delegated to the planar geometry library on linearized geometries.

use geo::{Contains, CoordsIter, EuclideanLength, HasDimensions, Relate};
use geo_types::{Coord, Geometry, LineString};

use crate::segment::segments;

/// Length of the linework of the geometry. For polygons this is the perimeter of all rings.
pub fn length(geometry: &Geometry<f64>) -> f64 {
    linework(geometry)
        .iter()
        .map(|line| line.euclidean_length())
        .sum()
}

/// All line strings of the geometry: lines themselves or rings of polygons.
pub fn linework(geometry: &Geometry<f64>) -> Vec<&LineString<f64>> {
    match geometry {
        Geometry::LineString(line) => vec![line],
        Geometry::MultiLineString(lines) => lines.0.iter().collect(),
        Geometry::Polygon(polygon) => std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .collect(),
        Geometry::MultiPolygon(polygons) => polygons
            .0
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .collect(),
        Geometry::GeometryCollection(collection) => {
            collection.0.iter().flat_map(linework).collect()
        }
        _ => vec![],
    }
}

/// Smallest distance from the point to the linework of the geometry, or `None` if it has no linework.
pub fn distance_to_point(geometry: &Geometry<f64>, point: &Coord<f64>) -> Option<f64> {
    linework(geometry)
        .into_iter()
        .flat_map(|line| segments(&line.0).map(|s| s.distance_to_point_sq(point)))
        .min_by(f64::total_cmp)
        .map(f64::sqrt)
}

/// Returns true if the point is inside the area of the geometry or closer than `tolerance` to its linework.
pub fn is_point_inside(geometry: &Geometry<f64>, point: &Coord<f64>, tolerance: f64) -> bool {
    let inside_area = match geometry {
        Geometry::Polygon(polygon) => polygon.contains(point),
        Geometry::MultiPolygon(polygons) => polygons.0.iter().any(|p| p.contains(point)),
        _ => false,
    };

    inside_area || distance_to_point(geometry, point).is_some_and(|d| d <= tolerance)
}

/// Topological equality: both geometries cover exactly the same set of points.
pub fn equals_topo(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => true,
        (false, false) => {
            let matrix = a.relate(b);
            matrix.is_within() && matrix.is_contains()
        }
        _ => false,
    }
}

/// Vertex by vertex equality: same kind of geometry with the same structure, every vertex of `a` not farther than
/// `tolerance` from the corresponding vertex of `b`.
pub fn equals_exact(a: &Geometry<f64>, b: &Geometry<f64>, tolerance: f64) -> bool {
    if std::mem::discriminant(a) != std::mem::discriminant(b) {
        return false;
    }

    let structure = |g: &Geometry<f64>| -> Vec<usize> {
        linework(g).iter().map(|line| line.0.len()).collect()
    };
    if structure(a) != structure(b) || a.coords_count() != b.coords_count() {
        return false;
    }

    let tolerance_sq = tolerance * tolerance;
    a.coords_iter().zip(b.coords_iter()).all(|(ca, cb)| {
        let dx = ca.x - cb.x;
        let dy = ca.y - cb.y;
        dx * dx + dy * dy <= tolerance_sq
    })
}
