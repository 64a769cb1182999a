pub mod fragment;
pub mod segment;

pub use fragment::*;
pub use segment::*;
