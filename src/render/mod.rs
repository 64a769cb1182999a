pub mod srt;
pub mod transcript;

pub use srt::*;
pub use transcript::*;
