//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
///
/// All the variants are raised when a geometry is constructed (or when a linearization tolerance is given). Once
/// an instance exists, its invariants hold for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// A circular string must have 0, 3 or an odd number of points larger than 3.
    #[error("invalid number of control points: {0} (expected 0, 3 or an odd number greater than 3)")]
    InvalidPointCount(usize),
    /// Flat ordinate arrays must contain whole points.
    #[error("ordinate array length {0} is not a multiple of the coordinate dimension")]
    OddOrdinateCount(usize),
    /// Only 2d (x, y) coordinates can be used.
    #[error("{0}d coordinates are not yet supported, only 2d")]
    UnsupportedDimension(usize),
    /// First and last points of an arc are the same, so the arc is not defined.
    #[error("first and last points of the arc are equal: ({x} {y})")]
    DegenerateArc {
        /// X of the repeated point.
        x: f64,
        /// Y of the repeated point.
        y: f64,
    },
    /// A component cannot be used to build a compound geometry.
    #[error("invalid component: {0}")]
    InvalidComponent(String),
    /// Two consecutive components of a compound curve do not share an end point.
    #[error("compound curve components {index} and {next_index} are not connected: {previous} and {next}")]
    Disconnected {
        /// Index of the first component of the pair.
        index: usize,
        /// Index of the second component of the pair.
        next_index: usize,
        /// Text of the first component.
        previous: String,
        /// Text of the second component.
        next: String,
    },
    /// A polygon ring does not end where it starts.
    #[error("polygon ring is not closed: {0}")]
    RingNotClosed(String),
    /// Linearization tolerance is negative or NaN.
    #[error("invalid linearization tolerance: {0}")]
    InvalidTolerance(f64),
    /// Ordinate buffer can only be shrunk with `set_size`.
    #[error("cannot grow ordinate buffer from {current} to {requested} ordinates")]
    BufferGrowth {
        /// Current number of ordinates.
        current: usize,
        /// Requested number of ordinates.
        requested: usize,
    },
}
