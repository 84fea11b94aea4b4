//! Writing geometries in the curve aware extension of the well known text format.
//!
//! Numbers are written regardless of locale in the shortest form that reads back to the same value. Values with
//! magnitude in `[1e-4, 1e16)` (and zero) always have a decimal point (`1.0`, not `1`); smaller and larger values use
//! the exponent form (`1e-7`, `1e16`). Points are separated by `", "` and x and y of a point by a single space.

use std::fmt::Write;

use geo_types::{Coord, LineString, Polygon};

pub(crate) const EMPTY: &str = "EMPTY";

pub(crate) fn write_ordinate(out: &mut String, value: f64) {
    // `Debug` formatting of `f64` keeps the fractional part outside of the exponent form.
    let _ = write!(out, "{value:?}");
}

pub(crate) fn write_coord(out: &mut String, c: Coord<f64>) {
    write_ordinate(out, c.x);
    out.push(' ');
    write_ordinate(out, c.y);
}

/// Writes `(x y, x y, ...)`.
pub(crate) fn write_coord_list(out: &mut String, coords: impl IntoIterator<Item = Coord<f64>>) {
    out.push('(');
    for (i, c) in coords.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coord(out, c);
    }
    out.push(')');
}

/// Writes a list of interleaved ordinates as `(x y, x y, ...)`.
pub(crate) fn write_ordinate_list(out: &mut String, ordinates: &[f64]) {
    write_coord_list(
        out,
        ordinates
            .chunks_exact(2)
            .map(|o| Coord { x: o[0], y: o[1] }),
    );
}

/// Writes a straight line as a bare coordinate list, or `EMPTY`.
pub(crate) fn write_line_string(out: &mut String, line: &LineString<f64>) {
    if line.0.is_empty() {
        out.push_str(EMPTY);
    } else {
        write_coord_list(out, line.coords().copied());
    }
}

/// Writes a straight polygon as `((x y, ...), (x y, ...))`, or `EMPTY`.
pub(crate) fn write_polygon(out: &mut String, polygon: &Polygon<f64>) {
    if polygon.exterior().0.is_empty() {
        out.push_str(EMPTY);
        return;
    }

    out.push('(');
    write_line_string(out, polygon.exterior());
    for ring in polygon.interiors() {
        out.push_str(", ");
        write_line_string(out, ring);
    }
    out.push(')');
}

/// Writes `TAG (member, member, ...)` or `TAG EMPTY` when there are no members.
pub(crate) fn write_tagged<T>(
    out: &mut String,
    tag: &str,
    members: &[T],
    mut write_member: impl FnMut(&mut String, &T),
) {
    out.push_str(tag);
    out.push(' ');
    if members.is_empty() {
        out.push_str(EMPTY);
        return;
    }

    out.push('(');
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_member(out, member);
    }
    out.push(')');
}
