use serde::{Deserialize, Serialize};

use crate::models::Segment;

/// The structured transcript view: full text plus per-segment timing.
///
/// Serializes to `{"text": ..., "segments": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// All segment texts joined with single spaces, in segment order
    pub text: String,
    /// The segments the text was assembled from, unchanged and in order
    pub segments: Vec<Segment>,
}

/// Assemble the structured transcript view from validated segments.
pub fn to_transcript(segments: &[Segment]) -> Transcript {
    let text = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    Transcript {
        text,
        segments: segments.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_transcript_joins_text() {
        let segments = vec![
            Segment {
                id: 1,
                start: 0.0,
                end: 2.5,
                text: "Hello".to_string(),
            },
            Segment {
                id: 2,
                start: 2.5,
                end: 4.5,
                text: "world".to_string(),
            },
        ];

        let transcript = to_transcript(&segments);

        assert_eq!(transcript.text, "Hello world");
        assert_eq!(transcript.segments, segments);
    }

    #[test]
    fn test_to_transcript_json_shape() {
        let segments = vec![Segment {
            id: 1,
            start: 0.0,
            end: 2.0,
            text: "Hello".to_string(),
        }];

        let json = serde_json::to_value(to_transcript(&segments)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "text": "Hello",
                "segments": [{"id": 1, "start": 0.0, "end": 2.0, "text": "Hello"}]
            })
        );
    }
}
