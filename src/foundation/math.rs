use crate::foundation::core::Point;

/// Clamp `t` into `[0, 1]`; NaN maps to 0.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Linear interpolation between `a` and `b` (unclamped).
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Snap a point to whole pixels.
pub(crate) fn round_point(p: Point) -> Point {
    Point::new(p.x.round(), p.y.round())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
