pub mod client;
pub mod recognizer;

pub use client::*;
pub use recognizer::*;
