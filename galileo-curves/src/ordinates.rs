//! Growable buffer of interleaved x/y ordinates.

use geo_types::{coord, Coord, LineString};

use crate::error::CurveError;

/// Append-only staging buffer of `x, y` ordinate pairs.
///
/// Linearization of arcs and compound curves accumulates points here and converts the result into a
/// [`LineString`] at the end. The buffer can be shrunk (to drop a point shared by two consecutive pieces) and
/// reversed point-wise, but never grown other than by appending.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrdinateBuffer {
    data: Vec<f64>,
}

impl OrdinateBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with space reserved for `points` points.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            data: Vec::with_capacity(points * 2),
        }
    }

    /// Number of ordinates in the buffer (twice the number of points).
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Number of points in the buffer.
    pub fn num_points(&self) -> usize {
        self.data.len() / 2
    }

    /// Returns true if the buffer holds no ordinates.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw ordinates.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Appends one point.
    pub fn add(&mut self, x: f64, y: f64) {
        self.data.push(x);
        self.data.push(y);
    }

    /// Appends a coordinate.
    pub fn add_coord(&mut self, c: Coord<f64>) {
        self.add(c.x, c.y);
    }

    /// Appends interleaved ordinates. The slice must have an even length.
    pub fn add_ordinates(&mut self, ordinates: &[f64]) {
        debug_assert!(ordinates.len() % 2 == 0);
        self.data.extend_from_slice(ordinates);
    }

    /// Appends the whole content of another buffer.
    pub fn add_buffer(&mut self, other: &OrdinateBuffer) {
        self.data.extend_from_slice(&other.data);
    }

    /// Appends all the coordinates of a line string.
    pub fn add_line_string(&mut self, line: &LineString<f64>) {
        self.data.reserve(line.0.len() * 2);
        for c in line.coords() {
            self.add(c.x, c.y);
        }
    }

    /// Last point in the buffer.
    pub fn last_point(&self) -> Option<Coord<f64>> {
        match self.data.as_slice() {
            [.., x, y] => Some(coord! { x: *x, y: *y }),
            _ => None,
        }
    }

    /// Shrinks the buffer to `size` ordinates. Growing the buffer this way is an error.
    pub fn set_size(&mut self, size: usize) -> Result<(), CurveError> {
        if size > self.data.len() {
            return Err(CurveError::BufferGrowth {
                current: self.data.len(),
                requested: size,
            });
        }

        self.data.truncate(size);
        Ok(())
    }

    /// Drops the last point, if any.
    pub(crate) fn drop_last_point(&mut self) {
        let size = self.data.len().saturating_sub(2);
        self.data.truncate(size);
    }

    /// Reverses the order of points `from..to` (point indices, end exclusive), keeping x and y of every point
    /// together.
    pub fn reverse(&mut self, from: usize, to: usize) {
        let to = to.min(self.num_points());
        if from >= to {
            return;
        }

        let (mut i, mut j) = (from, to - 1);
        while i < j {
            self.data.swap(2 * i, 2 * j);
            self.data.swap(2 * i + 1, 2 * j + 1);
            i += 1;
            j -= 1;
        }
    }

    /// Converts the content into a vector of coordinates.
    pub fn to_coords(&self) -> Vec<Coord<f64>> {
        self.data
            .chunks_exact(2)
            .map(|c| coord! { x: c[0], y: c[1] })
            .collect()
    }

    /// Consumes the buffer and returns its raw ordinates.
    pub fn into_ordinates(self) -> Vec<f64> {
        self.data
    }

    /// Consumes the buffer and builds a line string from its points.
    pub fn into_line_string(self) -> LineString<f64> {
        LineString::new(self.to_coords())
    }
}

impl From<Vec<f64>> for OrdinateBuffer {
    fn from(data: Vec<f64>) -> Self {
        debug_assert!(data.len() % 2 == 0);
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn add_and_truncate() {
        let mut buffer = OrdinateBuffer::new();
        buffer.add(0.0, 1.0);
        buffer.add(2.0, 3.0);
        buffer.add_ordinates(&[4.0, 5.0]);
        assert_eq!(buffer.num_points(), 3);
        assert_eq!(buffer.last_point(), Some(coord! { x: 4.0, y: 5.0 }));

        buffer.set_size(4).unwrap();
        assert_eq!(buffer.data(), &[0.0, 1.0, 2.0, 3.0]);

        assert_matches!(
            buffer.set_size(10),
            Err(CurveError::BufferGrowth {
                current: 4,
                requested: 10
            })
        );

        buffer.drop_last_point();
        buffer.drop_last_point();
        buffer.drop_last_point();
        assert!(buffer.is_empty());
        assert_eq!(buffer.last_point(), None);
    }

    #[test]
    fn reverse_keeps_pairs() {
        let mut buffer = OrdinateBuffer::from(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        buffer.reverse(0, 4);
        assert_eq!(buffer.data(), &[6.0, 7.0, 4.0, 5.0, 2.0, 3.0, 0.0, 1.0]);

        buffer.reverse(1, 3);
        assert_eq!(buffer.data(), &[6.0, 7.0, 2.0, 3.0, 4.0, 5.0, 0.0, 1.0]);

        buffer.reverse(2, 2);
        assert_eq!(buffer.data(), &[6.0, 7.0, 2.0, 3.0, 4.0, 5.0, 0.0, 1.0]);
    }

    #[test]
    fn line_string_round() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]);
        let mut buffer = OrdinateBuffer::with_capacity(4);
        buffer.add_line_string(&line);
        let mut other = OrdinateBuffer::new();
        other.add(2.0, 2.0);
        buffer.add_buffer(&other);

        assert_eq!(
            buffer.into_line_string(),
            LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
        );
    }
}
