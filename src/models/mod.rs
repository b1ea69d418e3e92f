//! Data models for tochka.

mod record;

pub use record::Record;
