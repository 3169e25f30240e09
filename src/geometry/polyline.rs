use crate::foundation::core::Point;
use crate::foundation::math::clamp01;

/// Position on a path plus the heading (radians) of the segment it lies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    /// Interpolated position.
    pub pos: Point,
    /// Direction of the containing segment, `atan2(dy, dx)`.
    pub angle: f64,
}

/// Total length of the connected segments through `points`.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Sample the polyline through `points` at arc-length fraction `t`.
///
/// `t` is clamped to `[0, 1]`. Fewer than two points, or a path of zero total length,
/// yields the first point (or the origin) with angle 0. Zero-length segments are skipped.
pub fn point_along_polyline(points: &[Point], t: f64) -> PathSample {
    let first = points.first().copied().unwrap_or(Point::ORIGIN);
    let degenerate = PathSample {
        pos: first,
        angle: 0.0,
    };
    if points.len() < 2 {
        return degenerate;
    }

    let total = polyline_length(points);
    if total <= 0.0 || !total.is_finite() {
        return degenerate;
    }

    let target = clamp01(t) * total;
    let last_seg = points.len() - 2;
    let mut acc = 0.0;
    for (i, w) in points.windows(2).enumerate() {
        let (a, b) = (w[0], w[1]);
        let len = a.distance(b);
        if (len > 0.0 && acc + len >= target) || i == last_seg {
            let k = if len > 0.0 {
                clamp01((target - acc) / len)
            } else {
                0.0
            };
            let angle = if len > 0.0 { (b - a).atan2() } else { 0.0 };
            return PathSample {
                pos: a.lerp(b, k),
                angle,
            };
        }
        acc += len;
    }
    degenerate
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polyline.rs"]
mod tests;
