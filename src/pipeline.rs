use std::path::Path;

use tracing::info;

use crate::asr::Recognizer;
use crate::error::Result;
use crate::models::Segment;
use crate::normalize::normalize;

/// Run recognition on a media file and normalize the output into segments.
///
/// Fails fast with a typed error: there is no retry and no partial result.
/// Either every surviving fragment comes back as a fully validated segment,
/// or the caller gets the error to surface as it sees fit.
pub async fn build_segments<R: Recognizer + ?Sized>(
    recognizer: &R,
    media: &Path,
) -> Result<Vec<Segment>> {
    info!("Recognizing speech in {:?}", media);
    let fragments = recognizer.recognize(media).await?;
    info!("Recognizer returned {} fragments", fragments.len());

    let segments = normalize(&fragments)?;
    info!("Normalized into {} segments", segments.len());

    Ok(segments)
}
