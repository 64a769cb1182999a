use crate::models::Segment;

/// Render segments as a SubRip document.
///
/// One block per segment, in list order: the sequence-number line, a
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line, the text, then a blank
/// separator line (the final block included). Text is emitted as-is with no
/// wrapping, and identical input always yields byte-identical output.
pub fn to_subrip(segments: &[Segment]) -> String {
    let mut out = String::new();

    for segment in segments {
        out.push_str(&segment.id.to_string());
        out.push('\n');

        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(segment.start),
            format_srt_timestamp(segment.end)
        ));

        out.push_str(&segment.text);
        out.push('\n');

        out.push('\n');
    }

    out
}

/// Format seconds as an SRT timestamp, milliseconds rounded to 3 digits.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;

    let milli = total_ms % 1000;
    let total_seconds = total_ms / 1000;
    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02},{milli:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_segments() -> Vec<Segment> {
        vec![
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
        ]
    }

    #[test]
    fn test_format_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(2.5), "00:00:02,500");
        assert_eq!(format_srt_timestamp(61.0), "00:01:01,000");
        assert_eq!(format_srt_timestamp(3661.5), "01:01:01,500");
        assert_eq!(format_srt_timestamp(36_000.042), "10:00:00,042");
    }

    #[test]
    fn test_format_srt_timestamp_rounds_milliseconds() {
        assert_eq!(format_srt_timestamp(0.0004), "00:00:00,000");
        assert_eq!(format_srt_timestamp(0.0006), "00:00:00,001");
        assert_eq!(format_srt_timestamp(1.9995), "00:00:02,000");
    }

    #[test]
    fn test_to_subrip_document() {
        let srt = to_subrip(&sample_segments());

        assert_eq!(
            srt,
            "1\n\
             00:00:00,000 --> 00:00:02,500\n\
             Hello\n\
             \n\
             2\n\
             00:00:02,500 --> 00:00:04,500\n\
             world\n\
             \n"
        );
    }

    #[test]
    fn test_to_subrip_is_deterministic() {
        let segments = sample_segments();
        assert_eq!(to_subrip(&segments), to_subrip(&segments));
    }

    #[test]
    fn test_to_subrip_does_not_wrap_text() {
        let segments = vec![Segment {
            id: 1,
            start: 0.0,
            end: 10.0,
            text: "a deliberately long line that a wrapping serializer would have split \
                   into several pieces but this one must keep intact"
                .to_string(),
        }];

        let srt = to_subrip(&segments);

        // id line, timing line, one text line, separator
        assert_eq!(srt.lines().count(), 4);
        assert!(srt.ends_with("intact\n\n"));
    }
}
