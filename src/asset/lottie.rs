use crate::foundation::core::{FrameBounds, FrameIndex, Fps, Marker};
use crate::foundation::error::MorphResult;

/// Top-level header of a Lottie (Bodymovin) JSON document.
///
/// Only the timeline fields are modelled; layers and assets are ignored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LottieDoc {
    /// In point (first frame).
    #[serde(default)]
    pub ip: f64,
    /// Out point (exclusive end frame).
    #[serde(default = "default_op")]
    pub op: f64,
    /// Frame rate.
    #[serde(default = "default_fr")]
    pub fr: f64,
    /// Composition width in asset-native units.
    #[serde(default)]
    pub w: f64,
    /// Composition height in asset-native units.
    #[serde(default)]
    pub h: f64,
    /// Named timeline markers.
    #[serde(default)]
    pub markers: Vec<LottieMarker>,
}

/// Raw marker entry (`cm` comment/name, `tm` time in frames, `dr` duration in frames).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LottieMarker {
    /// Marker name.
    #[serde(default)]
    pub cm: String,
    /// Marker position in frames.
    #[serde(default)]
    pub tm: f64,
    /// Marker duration in frames.
    #[serde(default)]
    pub dr: f64,
}

fn default_op() -> f64 {
    1.0
}

fn default_fr() -> f64 {
    30.0
}

impl LottieDoc {
    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> MorphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Seekable frame bounds of the document.
    pub fn bounds(&self) -> FrameBounds {
        FrameBounds::from_in_out(self.ip, self.op)
    }

    /// Validated frame rate.
    pub fn fps(&self) -> MorphResult<Fps> {
        Fps::new(self.fr)
    }

    /// Markers with frames rounded to whole frames.
    pub fn markers(&self) -> Vec<Marker> {
        self.markers
            .iter()
            .map(|m| Marker {
                name: m.cm.clone(),
                frame: FrameIndex::from_f64_round(m.tm),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/asset/lottie.rs"]
mod tests;
