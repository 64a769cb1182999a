use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::asr::Recognizer;
use crate::error::{Result, ScriberError};
use crate::models::Segment;
use crate::pipeline::build_segments;
use crate::render::{to_subrip, to_transcript};

/// Shared service state
#[derive(Clone)]
pub struct AppState {
    pub recognizer: Arc<dyn Recognizer>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    recognizer: String,
    started_at: String,
}

/// Build the application router.
pub fn app(recognizer: Arc<dyn Recognizer>) -> Router {
    let state = AppState {
        recognizer,
        started_at: Utc::now(),
    };

    Router::new()
        .route("/health", get(health))
        .route("/transcribe", post(transcribe_srt))
        .route("/transcribe-json", post(transcribe_json))
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(addr: SocketAddr, recognizer: Arc<dyn Recognizer>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app(recognizer)).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        recognizer: state.recognizer.name().to_string(),
        started_at: state.started_at.to_rfc3339(),
    })
}

/// POST /transcribe: media upload in, SubRip document out as an attachment.
async fn transcribe_srt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> std::result::Result<Response, (StatusCode, String)> {
    let upload = read_upload(&mut multipart).await?;
    let segments = run_pipeline(&state, &upload).await?;

    let srt = to_subrip(&segments);
    let stem = attachment_stem(&upload.file_name);

    let headers = [
        (header::CONTENT_TYPE, "application/x-subrip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{stem}.srt\""),
        ),
    ];
    Ok((headers, srt).into_response())
}

/// POST /transcribe-json: media upload in, structured transcript out.
async fn transcribe_json(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> std::result::Result<Response, (StatusCode, String)> {
    let upload = read_upload(&mut multipart).await?;
    let segments = run_pipeline(&state, &upload).await?;

    Ok(Json(to_transcript(&segments)).into_response())
}

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

/// Pull the `file` field out of the multipart body.
///
/// Rejects a missing field, a missing file name, and an empty body before
/// the pipeline ever runs.
async fn read_upload(
    multipart: &mut Multipart,
) -> std::result::Result<Upload, (StatusCode, String)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("malformed multipart body: {e}"),
        )
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .ok_or((
                StatusCode::BAD_REQUEST,
                "upload is missing a file name".to_string(),
            ))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("failed to read upload: {e}"),
                )
            })?
            .to_vec();

        if bytes.is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                "uploaded file is empty".to_string(),
            ));
        }

        return Ok(Upload { file_name, bytes });
    }

    Err((
        StatusCode::BAD_REQUEST,
        "multipart field 'file' is required".to_string(),
    ))
}

/// Spill the upload to a temporary file and run recognition + normalization.
///
/// The temporary file keeps the upload's extension so the recognition
/// service can pick a decoder, and is removed when this function returns.
async fn run_pipeline(
    state: &AppState,
    upload: &Upload,
) -> std::result::Result<Vec<Segment>, (StatusCode, String)> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        file = %upload.file_name,
        size = upload.bytes.len(),
        "transcription request"
    );

    let tmp = tempfile::Builder::new()
        .prefix("scriber-")
        .suffix(&upload_suffix(&upload.file_name))
        .tempfile()
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to create temporary file: {e}"),
            )
        })?;

    tokio::fs::write(tmp.path(), &upload.bytes).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to write temporary file: {e}"),
        )
    })?;

    build_segments(state.recognizer.as_ref(), tmp.path())
        .await
        .map_err(|e| {
            warn!(%request_id, "transcription failed: {e}");
            (error_status(&e), e.to_string())
        })
}

/// HTTP status for each pipeline error.
///
/// Unusable input is the client's problem; a misbehaving recognition service
/// is a gateway failure; everything else is ours.
fn error_status(error: &ScriberError) -> StatusCode {
    match error {
        ScriberError::EmptyTranscript | ScriberError::MissingUpstreamOutput => {
            StatusCode::BAD_REQUEST
        }
        ScriberError::Recognition { .. } => StatusCode::BAD_GATEWAY,
        ScriberError::Config { .. } | ScriberError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Attachment base name from the uploaded file name.
fn attachment_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("transcript")
}

/// Temporary-file suffix preserving the upload's extension.
fn upload_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| ".mp4".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asr::MockRecognizer;
    use crate::models::RawFragment;

    fn state_with(recognizer: MockRecognizer) -> AppState {
        AppState {
            recognizer: Arc::new(recognizer),
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&ScriberError::EmptyTranscript),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&ScriberError::MissingUpstreamOutput),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&ScriberError::Recognition {
                message: "down".to_string()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&ScriberError::Io(std::io::Error::other("disk"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_attachment_stem() {
        assert_eq!(attachment_stem("meeting.mp4"), "meeting");
        assert_eq!(attachment_stem("talk.final.mkv"), "talk.final");
        assert_eq!(attachment_stem(""), "transcript");
    }

    #[test]
    fn test_upload_suffix() {
        assert_eq!(upload_suffix("meeting.mp4"), ".mp4");
        assert_eq!(upload_suffix("audio.WAV"), ".WAV");
        assert_eq!(upload_suffix("noextension"), ".mp4");
    }

    #[tokio::test]
    async fn test_health_reports_recognizer() {
        let state = state_with(MockRecognizer::new());

        let Json(body) = health(State(state)).await;

        assert_eq!(body.status, "ok");
        assert_eq!(body.recognizer, "mock");
    }

    #[tokio::test]
    async fn test_run_pipeline_success() {
        let state = state_with(MockRecognizer::new().with_fragments(vec![
            RawFragment::new(Some(0.0), Some(2.5), " Hello "),
            RawFragment::new(Some(2.5), None, "world"),
        ]));
        let upload = Upload {
            file_name: "clip.mp4".to_string(),
            bytes: vec![0u8; 16],
        };

        let segments = run_pipeline(&state, &upload).await.unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text, "world");
    }

    #[tokio::test]
    async fn test_run_pipeline_maps_empty_transcript_to_400() {
        let state = state_with(
            MockRecognizer::new().with_fragments(vec![RawFragment::new(None, None, "x")]),
        );
        let upload = Upload {
            file_name: "silent.wav".to_string(),
            bytes: vec![0u8; 16],
        };

        let (status, message) = run_pipeline(&state, &upload).await.unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "no usable speech found in input");
    }

    #[tokio::test]
    async fn test_run_pipeline_maps_recognizer_failure_to_502() {
        let state = state_with(MockRecognizer::new().with_failure());
        let upload = Upload {
            file_name: "clip.mp4".to_string(),
            bytes: vec![0u8; 16],
        };

        let (status, _) = run_pipeline(&state, &upload).await.unwrap_err();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
