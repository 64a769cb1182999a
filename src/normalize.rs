use tracing::debug;

use crate::error::{Result, ScriberError};
use crate::models::{RawFragment, Segment};

/// Fallback duration in seconds for fragments the recognizer left open-ended.
///
/// Gives short or final fragments a non-zero, displayable duration.
pub const FALLBACK_DURATION_SECS: f64 = 2.0;

/// Validate raw fragments into an ordered segment list.
///
/// Precondition: the recognizer emits fragments in temporal order, so no
/// re-sorting happens here. Per fragment, in input order:
///
/// 1. no timing at all → skip;
/// 2. no start time → skip (a fragment with no confirmed start is unusable);
/// 3. no end time → synthesize `start + 2.0` seconds;
/// 4. trim the text; empty after trimming → skip;
/// 5. otherwise emit with the next sequential id, starting at 1.
///
/// A provided end time is taken as-is, even when it precedes the start.
///
/// Fails with [`ScriberError::EmptyTranscript`] when no fragment survives.
pub fn normalize(fragments: &[RawFragment]) -> Result<Vec<Segment>> {
    let mut segments: Vec<Segment> = Vec::with_capacity(fragments.len());
    let mut next_id = 1u32;

    for fragment in fragments {
        if !fragment.has_timing() {
            debug!("Skipping fragment without timing: {:?}", fragment.text);
            continue;
        }

        let Some(start) = fragment.start else {
            debug!("Skipping fragment without start time: {:?}", fragment.text);
            continue;
        };

        let end = fragment.end.unwrap_or(start + FALLBACK_DURATION_SECS);

        let text = fragment.text.trim();
        if text.is_empty() {
            debug!("Skipping fragment with blank text at {start}s");
            continue;
        }

        segments.push(Segment {
            id: next_id,
            start,
            end,
            text: text.to_string(),
        });
        next_id += 1;
    }

    if segments.is_empty() {
        return Err(ScriberError::EmptyTranscript);
    }

    debug!(
        "Accepted {} of {} fragments",
        segments.len(),
        fragments.len()
    );

    Ok(segments)
}
