//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("upload"; "original size -> {}", key);
//! debug!("store"; "put {} ({} bytes)", key, len);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// `error` lines go to stderr, everything else to stdout.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    if module_lower == "error" {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
        return;
    }

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Render an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Apply color to a module prefix based on module type.
///
/// Honors the `--color` override and whether the target stream is a terminal.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let (style, stream) = match module_lower {
        "dir" | "file" => (Style::new().bright_blue().bold(), Stream::Stdout),
        "upload" | "done" => (Style::new().bright_green().bold(), Stream::Stdout),
        "error" => (Style::new().bright_red().bold(), Stream::Stderr),
        _ => (Style::new().bright_yellow().bold(), Stream::Stdout),
    };
    prefix
        .if_supports_color(stream, |p| p.style(style))
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_follows_color_override() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("upload", "upload"), "[upload]");
        assert_eq!(colorize_prefix("Error", "error"), "[Error]");

        owo_colors::set_override(true);
        let colored = colorize_prefix("upload", "upload");
        assert!(colored.contains("\x1b["), "{colored:?}");
        assert!(colored.contains("[upload]"));

        owo_colors::unset_override();
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let io = std::io::Error::other("disk gone");
        let err = crate::store::StoreError::Open("/p/a.jpg".into(), io);
        assert_eq!(error_chain(&err), "can't open `/p/a.jpg` for upload: disk gone");
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
