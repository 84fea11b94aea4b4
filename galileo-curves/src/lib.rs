//! Curved geometries for [`geo_types`]: circular arcs, circular strings, compound curves, curve polygons and their
//! multi-geometries.
//!
//! Curved geometries keep their control points and are converted into standard [`geo_types`] geometries on demand
//! (*linearized*) with a given tolerance. See the [`curved`] module for details.
//!
//! ```
//! use galileo_curves::{CircularString, CurvedGeometry};
//!
//! let curve = CircularString::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0], 0.001).unwrap();
//! assert_eq!(curve.to_curved_text(), "CIRCULARSTRING (0.0 0.0, 1.0 1.0, 2.0 0.0)");
//!
//! let line = curve.linearize();
//! assert!(line.0.len() > 3);
//! ```

pub mod arc;
mod cache;
mod circular_string;
mod compound_curve;
mod curve;
mod curve_polygon;
pub mod curved;
mod envelope;
pub mod error;
mod factory;
mod geometry;
mod multi_curve;
mod multi_surface;
pub mod ordinates;
mod orient;
pub mod planar;
mod segment;
mod surface;
mod text;

pub use arc::{tolerance_equals, CircularArc, MAX_SEGMENTS_PER_QUADRANT};
pub use circular_string::CircularString;
pub use compound_curve::CompoundCurve;
pub use curve::Curve;
pub use curve_polygon::CurvePolygon;
pub use curved::{CompoundCurvedGeometry, CurvedGeometry, MultiCurvedGeometry, SingleCurvedGeometry};
pub use envelope::Envelope;
pub use error::CurveError;
pub use factory::CurvedGeometryFactory;
pub use geometry::Geom;
pub use multi_curve::MultiCurve;
pub use multi_surface::MultiSurface;
pub use ordinates::OrdinateBuffer;
pub use orient::Orientation;
pub use segment::Segment;
pub use surface::Surface;
