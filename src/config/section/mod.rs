//! Configuration section definitions.
//!
//! | Module  | TOML                                   | Purpose                       |
//! |---------|----------------------------------------|-------------------------------|
//! | `s3`    | `[s3]`                                 | Bucket, region, credentials   |
//! | `dirs`  | `[[dirs]]`                             | Directory → key prefix rules  |
//! | `sizes` | `sizes`, `quality`, `format` (top)     | Derivative sizes and encoding |

mod dirs;
mod s3;
pub mod sizes;

pub use dirs::DirectoryRule;
pub use self::s3::S3Config;
pub use sizes::{OutputFormat, SizeSpec};
