//! Circular arc defined by three points and its sampling.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use geo_types::{coord, Coord, LineString};

use crate::envelope::Envelope;
use crate::error::CurveError;
use crate::ordinates::OrdinateBuffer;
use crate::orient::Orientation;

/// Values closer than this are considered equal by [`tolerance_equals`].
pub const EPS: f64 = 1.0e-12;

/// Upper limit for the number of chords a quarter of a circle is split into during linearization.
///
/// With this limit one arc never produces more than `4 * MAX_SEGMENTS_PER_QUADRANT + 3` points. Tolerances that
/// would need more chords than that are not met.
pub const MAX_SEGMENTS_PER_QUADRANT: u32 = 1 << 13;

// Sine of the turn angle below which three points are treated as lying on one line.
const COLLINEAR_EPS: f64 = 1.0e-12;

// Sample angles closer than this to a control point are skipped.
const ANGLE_EPS: f64 = 1.0e-10;

/// Near equality of two tolerance values.
///
/// Used to decide whether a requested linearization tolerance is the one a geometry was created with.
pub fn tolerance_equals(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < EPS
}

/// Checks that the value can be used as a linearization tolerance.
pub fn validate_tolerance(tolerance: f64) -> Result<f64, CurveError> {
    if tolerance.is_nan() || tolerance < 0.0 {
        Err(CurveError::InvalidTolerance(tolerance))
    } else {
        Ok(tolerance)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Circle {
    center: Coord<f64>,
    radius: f64,
}

/// Part of a circle going from the first point to the last one through the middle point.
///
/// If the three points lie on one line the arc degenerates into a straight path through them. Such an arc has no
/// center and an infinite radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircularArc {
    points: [Coord<f64>; 3],
    circle: Option<Circle>,
}

impl CircularArc {
    /// Creates a new arc. Fails if the first and the last points are the same.
    pub fn new(start: Coord<f64>, mid: Coord<f64>, end: Coord<f64>) -> Result<Self, CurveError> {
        if start == end {
            return Err(CurveError::DegenerateArc {
                x: start.x,
                y: start.y,
            });
        }

        Ok(Self::new_unchecked(start, mid, end))
    }

    /// Creates a new arc from 6 interleaved ordinates.
    pub fn from_ordinates(ordinates: &[f64]) -> Result<Self, CurveError> {
        match ordinates {
            [x1, y1, x2, y2, x3, y3] => Self::new(
                coord! { x: *x1, y: *y1 },
                coord! { x: *x2, y: *y2 },
                coord! { x: *x3, y: *y3 },
            ),
            _ if ordinates.len() % 2 != 0 => Err(CurveError::OddOrdinateCount(ordinates.len())),
            _ => Err(CurveError::InvalidPointCount(ordinates.len() / 2)),
        }
    }

    pub(crate) fn new_unchecked(start: Coord<f64>, mid: Coord<f64>, end: Coord<f64>) -> Self {
        let points = [start, mid, end];
        Self {
            points,
            circle: fit_circle(&points),
        }
    }

    /// First point of the arc.
    pub fn start(&self) -> Coord<f64> {
        self.points[0]
    }

    /// Middle control point of the arc.
    pub fn mid(&self) -> Coord<f64> {
        self.points[1]
    }

    /// Last point of the arc.
    pub fn end(&self) -> Coord<f64> {
        self.points[2]
    }

    /// The three defining points.
    pub fn control_points(&self) -> [Coord<f64>; 3] {
        self.points
    }

    /// Center of the circle the arc belongs to, or `None` for a straight arc.
    pub fn center(&self) -> Option<Coord<f64>> {
        self.circle.map(|c| c.center)
    }

    /// Radius of the circle. Infinite for a straight arc.
    pub fn radius(&self) -> f64 {
        self.circle.map_or(f64::INFINITY, |c| c.radius)
    }

    /// Returns true if the control points lie on one line.
    pub fn is_collinear(&self) -> bool {
        self.circle.is_none()
    }

    /// Direction the arc goes from the first point to the last one.
    pub fn orientation(&self) -> Orientation {
        if self.is_collinear() {
            Orientation::Collinear
        } else {
            Orientation::triplet(self.points[0], self.points[1], self.points[2])
        }
    }

    /// Angle (always non-negative, in radians) the arc sweeps around its center. Zero for a straight arc.
    pub fn sweep_angle(&self) -> f64 {
        self.sweep().map_or(0.0, |s| s.sweep)
    }

    /// Returns true if the ray from the center at the given angle (radians, counterclockwise from the x axis)
    /// crosses the arc.
    pub fn contains_angle(&self, angle: f64) -> bool {
        self.sweep().is_some_and(|s| s.progress(angle) <= s.sweep)
    }

    fn sweep(&self) -> Option<Sweep> {
        let circle = self.circle?;
        let angle = |p: Coord<f64>| (p.y - circle.center.y).atan2(p.x - circle.center.x);
        let direction = match self.orientation() {
            Orientation::Counterclockwise => 1.0,
            _ => -1.0,
        };

        let start = angle(self.points[0]);
        let mut sweep = Sweep {
            start,
            direction,
            sweep: 0.0,
            mid: 0.0,
        };
        sweep.sweep = sweep.progress(angle(self.points[2]));
        sweep.mid = sweep.progress(angle(self.points[1]));

        Some(sweep)
    }

    /// Number of chords a quarter of the circle must be split into so that no chord deviates from the arc by more
    /// than `tolerance`.
    ///
    /// The result is always a power of two, so the sample angles for a smaller tolerance include all the sample
    /// angles for a larger one.
    pub fn segments_per_quadrant(&self, tolerance: f64) -> Result<u32, CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        Ok(self.segments_per_quadrant_unchecked(tolerance))
    }

    fn segments_per_quadrant_unchecked(&self, tolerance: f64) -> u32 {
        let Some(circle) = self.circle else {
            return 1;
        };

        let mut segments = 1;
        while chord_deviation(circle.radius, segments) > tolerance
            && segments < MAX_SEGMENTS_PER_QUADRANT
        {
            segments *= 2;
        }

        if chord_deviation(circle.radius, segments) > tolerance {
            log::warn!(
                "Arc with radius {} cannot be linearized with tolerance {tolerance}, using {segments} segments per quadrant",
                circle.radius
            );
        }

        segments
    }

    /// Approximates the arc with a line string. Every chord of the result deviates from the arc by no more than
    /// `tolerance`. The control points are always part of the result.
    pub fn linearize(&self, tolerance: f64) -> Result<LineString<f64>, CurveError> {
        let mut buffer = OrdinateBuffer::new();
        self.linearize_into(tolerance, &mut buffer)?;
        Ok(buffer.into_line_string())
    }

    /// Same as [`CircularArc::linearize`], but appends the sampled points to the buffer.
    pub fn linearize_into(
        &self,
        tolerance: f64,
        buffer: &mut OrdinateBuffer,
    ) -> Result<(), CurveError> {
        let tolerance = validate_tolerance(tolerance)?;
        self.sample_into(tolerance, buffer);
        Ok(())
    }

    pub(crate) fn sample_into(&self, tolerance: f64, buffer: &mut OrdinateBuffer) {
        let (Some(circle), Some(sweep)) = (self.circle, self.sweep()) else {
            for p in self.points {
                buffer.add_coord(p);
            }
            return;
        };

        let segments = self.segments_per_quadrant_unchecked(tolerance);
        let step = FRAC_PI_2 / segments as f64;
        let mut index = if sweep.direction > 0.0 {
            (sweep.start / step).floor() + 1.0
        } else {
            (sweep.start / step).ceil() - 1.0
        };

        buffer.add_coord(self.points[0]);
        let mut mid_added = false;
        for _ in 0..=4 * segments {
            let angle = index * step;
            let progress = (angle - sweep.start) * sweep.direction;
            if progress >= sweep.sweep - ANGLE_EPS {
                break;
            }
            index += sweep.direction;

            if !mid_added && progress >= sweep.mid - ANGLE_EPS {
                buffer.add_coord(self.points[1]);
                mid_added = true;
                if (progress - sweep.mid).abs() < ANGLE_EPS {
                    continue;
                }
            }

            if progress > ANGLE_EPS {
                buffer.add(
                    circle.center.x + circle.radius * angle.cos(),
                    circle.center.y + circle.radius * angle.sin(),
                );
            }
        }

        if !mid_added {
            buffer.add_coord(self.points[1]);
        }
        buffer.add_coord(self.points[2]);
    }

    /// Bounding box of the arc itself (not just of its control points).
    pub fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::from_coord(self.points[0]);
        self.expand_envelope(&mut envelope);
        envelope
    }

    /// Expands the envelope to include the whole arc.
    ///
    /// Besides the control points, the points of the circle extreme along the x or y axis are added if the arc
    /// passes through them.
    pub fn expand_envelope(&self, envelope: &mut Envelope) {
        for p in self.points {
            envelope.expand_to_include(p.x, p.y);
        }

        let Some(circle) = self.circle else {
            return;
        };

        let Coord { x, y } = circle.center;
        let r = circle.radius;
        let extremes = [
            (0.0, x + r, y),
            (FRAC_PI_2, x, y + r),
            (PI, x - r, y),
            (-FRAC_PI_2, x, y - r),
        ];
        for (angle, ex, ey) in extremes {
            if self.contains_angle(angle) {
                envelope.expand_to_include(ex, ey);
            }
        }
    }
}

// Angular span of an arc. Progress is measured from the start angle along the arc direction.
#[derive(Debug, Copy, Clone)]
struct Sweep {
    start: f64,
    direction: f64,
    sweep: f64,
    mid: f64,
}

impl Sweep {
    fn progress(&self, angle: f64) -> f64 {
        ((angle - self.start) * self.direction).rem_euclid(TAU)
    }
}

// Circle through three points: the intersection of the perpendicular bisectors of the two chords.
fn fit_circle(points: &[Coord<f64>; 3]) -> Option<Circle> {
    let [p1, p2, p3] = *points;
    let b = p2 - p1;
    let c = p3 - p1;
    let chord_a = b.x.hypot(b.y);
    let chord_b = (p3.x - p2.x).hypot(p3.y - p2.y);
    if chord_a == 0.0 || chord_b == 0.0 {
        return None;
    }

    let turn = (b.x * (p3.y - p2.y) - b.y * (p3.x - p2.x)) / (chord_a * chord_b);
    if turn.abs() < COLLINEAR_EPS || !turn.is_finite() {
        return None;
    }

    let d = 2.0 * (b.x * c.y - b.y * c.x);
    let b_sq = b.x * b.x + b.y * b.y;
    let c_sq = c.x * c.x + c.y * c.y;
    let ux = (c.y * b_sq - b.y * c_sq) / d;
    let uy = (b.x * c_sq - c.x * b_sq) / d;

    let center = coord! { x: p1.x + ux, y: p1.y + uy };
    let radius = ux.hypot(uy);
    if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
        return None;
    }

    Some(Circle { center, radius })
}

// Distance between the middle of a chord and the circle when a quadrant is split into `segments` chords.
fn chord_deviation(radius: f64, segments: u32) -> f64 {
    radius * (1.0 - (FRAC_PI_2 / (2.0 * segments as f64)).cos())
}

/// Cursor over the arcs of a circular string.
///
/// Every arc after the first one starts at the last point of the previous arc.
#[derive(Debug, Clone)]
pub struct Arcs<'a> {
    ordinates: &'a [f64],
    index: usize,
}

impl<'a> Arcs<'a> {
    /// `ordinates` must contain 0 or 3, 5, 7... points with distinct first and last points in every arc.
    pub(crate) fn new(ordinates: &'a [f64]) -> Self {
        Self {
            ordinates,
            index: 0,
        }
    }
}

impl Iterator for Arcs<'_> {
    type Item = CircularArc;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.index * 4;
        let o = self.ordinates.get(offset..offset + 6)?;
        self.index += 1;

        Some(CircularArc::new_unchecked(
            coord! { x: o[0], y: o[1] },
            coord! { x: o[2], y: o[3] },
            coord! { x: o[4], y: o[5] },
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = (self.ordinates.len() / 2).saturating_sub(1) / 2;
        let remaining = total.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Arcs<'_> {}
