use geo_types::Polygon;

use crate::curve_polygon::CurvePolygon;
use crate::curved::CurvedGeometry;
use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::text;

/// A polygon that may have curved rings. Member of a [`MultiSurface`](crate::MultiSurface).
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Polygon with straight rings only.
    Straight(Polygon<f64>),
    /// Polygon that may have curved rings.
    Curved(CurvePolygon),
}

impl Surface {
    /// Returns true if the surface has no rings.
    pub fn is_empty(&self) -> bool {
        match self {
            Surface::Straight(polygon) => polygon.exterior().0.is_empty(),
            Surface::Curved(polygon) => polygon.is_empty(),
        }
    }

    /// Linearization with the given tolerance. Straight polygons are returned as is.
    pub fn linearize_with(&self, tolerance: f64) -> Result<Polygon<f64>, CurveError> {
        match self {
            Surface::Straight(polygon) => Ok(polygon.clone()),
            Surface::Curved(polygon) => Ok((*polygon.linearize_with(tolerance)?).clone()),
        }
    }

    // `tolerance` must already be validated.
    pub(crate) fn linearize_unchecked(&self, tolerance: f64) -> Polygon<f64> {
        match self {
            Surface::Straight(polygon) => polygon.clone(),
            Surface::Curved(polygon) => polygon.linearize_unchecked(tolerance),
        }
    }

    /// Bounding box of the surface.
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Surface::Straight(polygon) => Envelope::from_coords(polygon.exterior().coords().copied()),
            Surface::Curved(polygon) => polygon.envelope(),
        }
    }

    /// Number of ordinates per point.
    pub fn coordinate_dimension(&self) -> usize {
        match self {
            Surface::Straight(_) => 2,
            Surface::Curved(polygon) => polygon.coordinate_dimension(),
        }
    }

    /// Same surface with every ring reversed.
    pub fn reverse(&self) -> Surface {
        match self {
            Surface::Straight(polygon) => {
                let reverse = |ring: &geo_types::LineString<f64>| {
                    geo_types::LineString::new(ring.0.iter().rev().copied().collect())
                };
                Surface::Straight(Polygon::new(
                    reverse(polygon.exterior()),
                    polygon.interiors().iter().map(reverse).collect(),
                ))
            }
            Surface::Curved(polygon) => Surface::Curved(polygon.reverse()),
        }
    }

    /// Writes the surface as a member of a multi surface: curved polygons with their tag, straight ones as a bare
    /// list of rings.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Surface::Straight(polygon) => text::write_polygon(out, polygon),
            Surface::Curved(polygon) => polygon.write_curved_text(out),
        }
    }
}

impl From<Polygon<f64>> for Surface {
    fn from(value: Polygon<f64>) -> Self {
        Self::Straight(value)
    }
}

impl From<CurvePolygon> for Surface {
    fn from(value: CurvePolygon) -> Self {
        Self::Curved(value)
    }
}
