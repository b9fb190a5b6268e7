//! Utility modules shared across the uploader.

pub mod mime;
pub mod path;
mod plural;

pub use plural::plural_count;
