//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path resolution (`resolve_path`, `absolutize`, `expand_tilde`)

pub mod fs;

pub use fs::{absolutize, expand_tilde, resolve_path};
