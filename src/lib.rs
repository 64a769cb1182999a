pub mod asr;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod server;

pub use asr::{HttpRecognizer, MockRecognizer, Recognizer, RecognizerConfig};
pub use error::{Result, ScriberError};
pub use models::{RawFragment, Segment};
pub use normalize::{FALLBACK_DURATION_SECS, normalize};
pub use pipeline::build_segments;
pub use render::{Transcript, format_srt_timestamp, to_subrip, to_transcript};
pub use server::{app, serve};
