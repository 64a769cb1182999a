use serde::{Deserialize, Serialize};

/// A validated fragment ready for rendering: trimmed non-empty text, a
/// resolved end time, and a stable sequence number.
///
/// Ids start at 1 and increment by one per accepted fragment, so a list of N
/// segments always carries ids 1..=N. Lists are produced in the recognizer's
/// temporal order and are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position in the emitted sequence
    pub id: u32,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Trimmed, non-empty text
    pub text: String,
}

impl Segment {
    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let segment = Segment {
            id: 1,
            start: 2.5,
            end: 4.5,
            text: "world".to_string(),
        };
        assert_eq!(segment.duration(), 2.0);
    }

    #[test]
    fn test_duration_never_negative() {
        let segment = Segment {
            id: 1,
            start: 4.0,
            end: 3.0,
            text: "inverted".to_string(),
        };
        assert_eq!(segment.duration(), 0.0);
    }

    #[test]
    fn test_json_shape() {
        let segment = Segment {
            id: 2,
            start: 2.5,
            end: 4.5,
            text: "world".to_string(),
        };

        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 2, "start": 2.5, "end": 4.5, "text": "world"})
        );
    }
}
