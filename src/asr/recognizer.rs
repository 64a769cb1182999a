use std::path::Path;

use async_trait::async_trait;

use crate::error::{Result, ScriberError};
use crate::models::RawFragment;

/// Trait for automatic speech recognition backends.
///
/// This trait allows swapping implementations (remote service vs mock).
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize speech in a decodable audio/video file.
    ///
    /// Returns timestamped fragments in temporal order. Fails with
    /// [`ScriberError::MissingUpstreamOutput`] when the backend produced no
    /// fragment collection at all.
    async fn recognize(&self, media: &Path) -> Result<Vec<RawFragment>>;

    /// Identity of the backing model or service, for logs and health checks.
    fn name(&self) -> &str;
}

/// Mock recognizer for testing
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    fragments: Vec<RawFragment>,
    missing_output: bool,
    should_fail: bool,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to return specific fragments
    pub fn with_fragments(mut self, fragments: Vec<RawFragment>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Configure the mock to report no fragment collection at all
    pub fn with_missing_output(mut self) -> Self {
        self.missing_output = true;
        self
    }

    /// Configure the mock to fail on recognize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    async fn recognize(&self, _media: &Path) -> Result<Vec<RawFragment>> {
        if self.should_fail {
            Err(ScriberError::Recognition {
                message: "mock recognition failure".to_string(),
            })
        } else if self.missing_output {
            Err(ScriberError::MissingUpstreamOutput)
        } else {
            Ok(self.fragments.clone())
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
