//! Terminal status messages.
//!
//! Status lines go to stderr so stdout stays machine-readable for `resolve`.

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

static COLOR_DISABLED: AtomicBool = AtomicBool::new(false);

/// Record the `--no-color` flag. Call once from `main`.
pub fn init_colors(no_color: bool) {
    COLOR_DISABLED.store(no_color, Ordering::Relaxed);
}

/// Check if color output should be enabled.
///
/// Respects `--no-color`, `NO_COLOR` and `FORCE_COLOR`, then falls back to
/// terminal detection on stderr.
pub fn should_use_color() -> bool {
    if COLOR_DISABLED.load(Ordering::Relaxed) {
        return false;
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    if should_use_color() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if should_use_color() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if should_use_color() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_wins() {
        init_colors(true);
        assert!(!should_use_color());
        init_colors(false);
    }
}
