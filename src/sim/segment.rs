//! Line segment intersection
//!
//! Cramer's rule on the two segment parameterisations. Parallel and
//! collinear pairs are reported as a miss; overlapping collinear segments
//! are never detected as a hit.

use glam::{DVec2, Vec2};

/// Intersection point of segments AB and CD, if they cross.
///
/// Both parameter ranges are inclusive, so segments that only touch at an
/// endpoint intersect. Arithmetic is done in f64 and the point is returned
/// in f32.
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let (a, b, c, d) = (a.as_dvec2(), b.as_dvec2(), c.as_dvec2(), d.as_dvec2());
    let ab = b - a;
    let cd = d - c;
    let ca = a - c;

    let denominator = ab.x * cd.y - ab.y * cd.x;
    if denominator == 0.0 {
        return None;
    }

    let r = (ca.y * cd.x - ca.x * cd.y) / denominator;
    let s = (ca.y * ab.x - ca.x * ab.y) / denominator;

    if !(0.0..=1.0).contains(&r) || !(0.0..=1.0).contains(&s) {
        return None;
    }

    let point: DVec2 = a + ab * r;
    Some(point.as_vec2())
}

/// Whether segments AB and CD intersect
#[inline]
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    segment_intersection(a, b, c, d).is_some()
}
