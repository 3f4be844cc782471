//! Triangle edge setup for scanline filling.
//!
//! A triangle sorted by ascending Y has one edge spanning its full height
//! (`p0 -> p2`, the long edge) and two edges meeting at `p1` (the short edges).
//! Joining the short edges gives a second sequence covering the same rows.
//! [`classify_edges`] decides which of the two is on the left, and every other
//! attribute reuses that decision through [`interpolate_edges`].

use super::interpolate::{interpolate, Attribute};
use crate::canvas::Point2;

/// Which edge sequence bounds the triangle on the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeftSide {
    /// The long edge `p0 -> p2`.
    Long,
    /// The joined short edges `p0 -> p1 -> p2`.
    Short,
}

/// Left and right boundary values for every row of a triangle.
///
/// Both sequences hold `p2.y - p0.y + 1` values; row `y` lives at `y - p0.y`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePair<T> {
    pub left: Vec<T>,
    pub right: Vec<T>,
}

impl<T: Copy> EdgePair<T> {
    /// Left and right values of one row, indexed from the first row.
    #[inline]
    pub fn span(&self, row: usize) -> (T, T) {
        (self.left[row], self.right[row])
    }
}

/// A vertex with its attributes, sorted as one unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex<A> {
    pub point: Point2,
    pub attrs: A,
}

/// Sorts three vertices by ascending Y with a fixed three-step network.
///
/// Attributes travel with their point. Vertices with equal Y keep their
/// relative order.
pub fn sort_by_y<A: Copy>(vertices: &mut [ScreenVertex<A>; 3]) {
    if vertices[1].point.y < vertices[0].point.y {
        vertices.swap(0, 1);
    }
    if vertices[2].point.y < vertices[0].point.y {
        vertices.swap(0, 2);
    }
    if vertices[2].point.y < vertices[1].point.y {
        vertices.swap(1, 2);
    }
}

/// Long edge and joined short edges of one attribute, in that order.
fn long_and_short<T: Attribute>(ys: [i32; 3], values: [T; 3]) -> (Vec<T>, Vec<T>) {
    let mut short = interpolate(ys[0], values[0], ys[1], values[1]);
    let upper = interpolate(ys[1], values[1], ys[2], values[2]);
    let long = interpolate(ys[0], values[0], ys[2], values[2]);

    // The shared sample at p1 is the first value of the upper edge.
    short.pop();
    short.extend(upper);

    (long, short)
}

/// Computes the left/right screen X of every row of a Y-sorted triangle.
///
/// The left side is picked by comparing both sequences at the middle row.
pub fn classify_edges(p0: Point2, p1: Point2, p2: Point2) -> (EdgePair<i32>, LeftSide) {
    debug_assert!(p0.y <= p1.y && p1.y <= p2.y, "vertices must be sorted by y");

    let (long, short) = long_and_short([p0.y, p1.y, p2.y], [p0.x, p1.x, p2.x]);
    let m = long.len() / 2;

    if long[m] < short[m] {
        (
            EdgePair {
                left: long,
                right: short,
            },
            LeftSide::Long,
        )
    } else {
        (
            EdgePair {
                left: short,
                right: long,
            },
            LeftSide::Short,
        )
    }
}

/// Interpolates one per-vertex attribute along the edges of a Y-sorted triangle,
/// using the side assignment produced by [`classify_edges`].
pub fn interpolate_edges<T: Attribute>(
    points: [Point2; 3],
    values: [T; 3],
    left_side: LeftSide,
) -> EdgePair<T> {
    let (long, short) = long_and_short([points[0].y, points[1].y, points[2].y], values);
    match left_side {
        LeftSide::Long => EdgePair {
            left: long,
            right: short,
        },
        LeftSide::Short => EdgePair {
            left: short,
            right: long,
        },
    }
}
