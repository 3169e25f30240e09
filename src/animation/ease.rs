use std::str::FromStr;

use crate::foundation::error::MorphError;

/// Easing functions used to map normalized animation progress.
///
/// Parses and serializes as GSAP-style names (`"power2.inOut"`, `"sine.out"`, `"none"`), so
/// configuration written for the web page can be reused verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    #[default]
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        use std::f64::consts::PI;

        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => in_out_pow(t, 2),
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out_pow(t, 3),
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out_pow(t, 4),
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out_pow(t, 5),
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Canonical GSAP-style name of this curve.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::InQuad => "power1.in",
            Self::OutQuad => "power1.out",
            Self::InOutQuad => "power1.inOut",
            Self::InCubic => "power2.in",
            Self::OutCubic => "power2.out",
            Self::InOutCubic => "power2.inOut",
            Self::InQuart => "power3.in",
            Self::OutQuart => "power3.out",
            Self::InOutQuart => "power3.inOut",
            Self::InQuint => "power4.in",
            Self::OutQuint => "power4.out",
            Self::InOutQuint => "power4.inOut",
            Self::InSine => "sine.in",
            Self::OutSine => "sine.out",
            Self::InOutSine => "sine.inOut",
        }
    }
}

fn in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(n) / 2.0)
    }
}

impl FromStr for Ease {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("linear") {
            return Ok(Self::Linear);
        }

        // A bare family name ("power2") means the ease-out variant.
        let (family, variant) = s.split_once('.').unwrap_or((s, "out"));
        let curves = match family.to_ascii_lowercase().as_str() {
            "power0" => return Ok(Self::Linear),
            "power1" | "quad" => [Self::InQuad, Self::OutQuad, Self::InOutQuad],
            "power2" | "cubic" => [Self::InCubic, Self::OutCubic, Self::InOutCubic],
            "power3" | "quart" => [Self::InQuart, Self::OutQuart, Self::InOutQuart],
            "power4" | "quint" | "strong" => [Self::InQuint, Self::OutQuint, Self::InOutQuint],
            "sine" => [Self::InSine, Self::OutSine, Self::InOutSine],
            _ => return Err(MorphError::validation(format!("unknown ease '{s}'"))),
        };
        match variant.to_ascii_lowercase().as_str() {
            "in" => Ok(curves[0]),
            "out" => Ok(curves[1]),
            "inout" => Ok(curves[2]),
            _ => Err(MorphError::validation(format!("unknown ease variant '{s}'"))),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = MorphError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ease> for String {
    fn from(e: Ease) -> String {
        e.name().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
