use serde::{Deserialize, Serialize};

/// A single unit of recognized speech with approximate timing, as emitted by
/// the recognition service.
///
/// Either timestamp may be missing: the recognizer often leaves the end of
/// the final fragment open, and occasionally commits to no timing at all.
/// All validation happens once, in [`crate::normalize::normalize`], rather
/// than repeatedly downstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawFragment {
    /// Start timestamp in seconds, if the recognizer committed to one
    #[serde(default)]
    pub start: Option<f64>,
    /// End timestamp in seconds, if the recognizer committed to one
    #[serde(default)]
    pub end: Option<f64>,
    /// Recognized text, possibly empty or whitespace-only
    #[serde(default)]
    pub text: String,
}

impl RawFragment {
    pub fn new(start: Option<f64>, end: Option<f64>, text: &str) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
        }
    }

    /// Whether the recognizer attached any timing to this fragment.
    pub fn has_timing(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}
