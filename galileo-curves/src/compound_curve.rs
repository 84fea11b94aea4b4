use std::sync::Arc;

use geo_types::{Coord, Geometry, LineString};

use crate::arc::{tolerance_equals, validate_tolerance};
use crate::cache::LinearizationCache;
use crate::curve::Curve;
use crate::curved::{CompoundCurvedGeometry, CurvedGeometry};
use crate::envelope::{merge_all, Envelope};
use crate::error::CurveError;
use crate::geometry::Geom;
use crate::ordinates::OrdinateBuffer;
use crate::{planar, text};

/// A single continuous line made of straight and circular pieces.
///
/// Every piece starts exactly where the previous one ends. Compound curves passed as pieces are replaced with their
/// own pieces, so [`CompoundCurvedGeometry::components`] never contains another compound curve.
#[derive(Debug, Clone)]
pub struct CompoundCurve {
    components: Vec<Curve>,
    tolerance: f64,
    linearized: LinearizationCache<LineString<f64>>,
}

impl CompoundCurve {
    /// Creates a new compound curve. Fails if any piece is empty or two consecutive pieces are not connected.
    pub fn new(components: Vec<Curve>, tolerance: f64) -> Result<Self, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        let components = flatten(components);

        for component in &components {
            match component {
                Curve::Straight(line) if line.0.len() < 2 => {
                    return Err(CurveError::InvalidComponent(format!(
                        "straight component must have at least 2 points: {}",
                        component.to_text()
                    )));
                }
                _ if component.is_empty() => {
                    return Err(CurveError::InvalidComponent(
                        "compound curve component cannot be empty".into(),
                    ));
                }
                _ => {}
            }
        }

        for (index, pair) in components.windows(2).enumerate() {
            if pair[0].end_point() != pair[1].start_point() {
                return Err(CurveError::Disconnected {
                    index,
                    next_index: index + 1,
                    previous: pair[0].to_text(),
                    next: pair[1].to_text(),
                });
            }
        }

        Ok(Self {
            components,
            tolerance,
            linearized: LinearizationCache::new(),
        })
    }

    /// Creates a compound curve without any pieces.
    pub fn empty(tolerance: f64) -> Result<Self, CurveError> {
        Self::new(vec![], tolerance)
    }

    /// Number of pieces.
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// First point of the first piece.
    pub fn start_point(&self) -> Option<Coord<f64>> {
        self.components.first()?.start_point()
    }

    /// Last point of the last piece.
    pub fn end_point(&self) -> Option<Coord<f64>> {
        self.components.last()?.end_point()
    }

    /// Returns true if the last piece ends exactly where the first one starts.
    pub fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    /// Same curve going in the opposite direction: pieces are taken in reverse order and each one is reversed.
    pub fn reverse(&self) -> Self {
        Self {
            components: self.components.iter().rev().map(Curve::reverse).collect(),
            tolerance: self.tolerance,
            linearized: LinearizationCache::new(),
        }
    }

    /// Returns true if the linearization with the curve's own tolerance has already been computed.
    pub fn is_linearized(&self) -> bool {
        self.linearized.is_initialized()
    }

    fn linearize_unchecked(&self, tolerance: f64) -> LineString<f64> {
        let mut buffer = OrdinateBuffer::new();
        self.append_linearized(tolerance, &mut buffer);
        buffer.into_line_string()
    }

    // The first point of every piece repeats the last point of the previous one, so it is written once.
    pub(crate) fn append_linearized(&self, tolerance: f64, buffer: &mut OrdinateBuffer) {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                buffer.drop_last_point();
            }
            component.append_linearized(tolerance, buffer);
        }
    }

    pub(crate) fn has_same_components(&self, other: &Self) -> bool {
        self.components.len() == other.components.len()
            && self
                .components
                .iter()
                .zip(&other.components)
                .all(|(a, b)| a.same_points(b))
    }

    /// Structural equality with another geometry within `tolerance`.
    ///
    /// Compound curves with the same number of pieces are first compared piece by piece. If that fails, the
    /// linearizations are compared vertex by vertex.
    pub fn equals_exact(&self, other: &Geom, tolerance: f64) -> bool {
        if let Geom::CompoundCurve(other) = other {
            if self.components.len() == other.components.len()
                && self
                    .components
                    .iter()
                    .zip(&other.components)
                    .all(|(a, b)| component_equals_exact(a, b, tolerance))
            {
                return true;
            }
        }

        planar::equals_exact(&self.linear_geometry(), &other.linearize(), tolerance)
    }
}

fn component_equals_exact(a: &Curve, b: &Curve, tolerance: f64) -> bool {
    match (a, b) {
        (Curve::Circular(a), Curve::Circular(b)) => {
            a.has_same_control_points(b)
                || planar::equals_exact(&a.linear_geometry(), &b.linear_geometry(), tolerance)
        }
        (Curve::Straight(a), Curve::Straight(b)) => planar::equals_exact(
            &a.clone().into(),
            &b.clone().into(),
            tolerance,
        ),
        _ => false,
    }
}

fn flatten(components: Vec<Curve>) -> Vec<Curve> {
    let mut flattened = Vec::with_capacity(components.len());
    for component in components {
        match component {
            Curve::Compound(inner) => {
                log::debug!(
                    "Flattening nested compound curve with {} components",
                    inner.components.len()
                );
                flattened.extend(inner.components);
            }
            other => flattened.push(other),
        }
    }

    flattened
}

impl PartialEq for CompoundCurve {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components && tolerance_equals(self.tolerance, other.tolerance)
    }
}

impl CurvedGeometry for CompoundCurve {
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
        text::write_tagged(out, "COMPOUNDCURVE", &self.components, |out, component| {
            component.write_text(out)
        });
    }

    fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn envelope(&self) -> Option<Envelope> {
        merge_all(self.components.iter().map(Curve::envelope))
    }

    fn coordinate_dimension(&self) -> usize {
        self.components
            .iter()
            .map(Curve::coordinate_dimension)
            .min()
            .unwrap_or(2)
    }

    fn equals_topo(&self, other: &Geom) -> bool {
        if let Geom::CompoundCurve(other) = other {
            if self.has_same_components(other) {
                return true;
            }
        }

        planar::equals_topo(&self.linear_geometry(), &other.linearize())
    }
}

impl CompoundCurvedGeometry for CompoundCurve {
    fn components(&self) -> &[Curve] {
        &self.components
    }
}

impl From<CompoundCurve> for Geometry<f64> {
    fn from(value: CompoundCurve) -> Self {
        Geometry::LineString((*value.linearize()).clone())
    }
}
