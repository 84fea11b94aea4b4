use geo_types::Coord;

/// A strait line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a Coord<f64>, pub &'a Coord<f64>);

impl Segment<'_> {
    /// Shortest euclidian distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is the squared length
    ///   of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned value is the smaller one
    ///   of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq(&self, point: &Coord<f64>) -> f64 {
        if self.0 == self.1 {
            return distance_sq(self.0, point);
        }

        let ds = *self.1 - *self.0;
        let dp = *point - *self.0;
        let ds_len = ds.x * ds.x + ds.y * ds.y;

        let r = (dp.x * ds.x + dp.y * ds.y) / ds_len;
        if r <= 0.0 {
            distance_sq(self.0, point)
        } else if r >= 1.0 {
            distance_sq(self.1, point)
        } else {
            let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
            (s * s) * ds_len
        }
    }
}

pub(crate) fn distance_sq(a: &Coord<f64>, b: &Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Iterates over the segments between consecutive coordinates.
pub(crate) fn segments(coords: &[Coord<f64>]) -> impl Iterator<Item = Segment<'_>> {
    coords.windows(2).map(|pair| Segment(&pair[0], &pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn distance_to_point() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 2.0, y: 0.0 };
        let segment = Segment(&a, &b);

        assert_eq!(segment.distance_to_point_sq(&coord! { x: 1.0, y: 1.0 }), 1.0);
        assert_eq!(segment.distance_to_point_sq(&coord! { x: -1.0, y: 0.0 }), 1.0);
        assert_eq!(segment.distance_to_point_sq(&coord! { x: 3.0, y: 2.0 }), 5.0);

        let degenerate = Segment(&a, &a);
        assert_eq!(degenerate.distance_to_point_sq(&coord! { x: 3.0, y: 4.0 }), 25.0);
    }
}
