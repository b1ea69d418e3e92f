//! Shared utility functions.

mod text;

pub use text::{normalize, title_case};
