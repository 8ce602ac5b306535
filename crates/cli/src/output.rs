//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use parfum_core::Error;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a structured error with its code and suggestion
    pub fn report(err: &Error) {
        eprintln!("{} {} {}", "✗".red(), err.code.dimmed(), err.message);
        if let Some(ctx) = &err.context {
            eprintln!("  {} {}", "context:".dimmed(), ctx);
        }
        if let Some(suggestion) = &err.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Format a relevance score with an explicit sign
pub fn format_score(score: f64) -> String {
    if score.abs() < 0.05 {
        "0.0".to_string()
    } else {
        format!("{score:+.1}")
    }
}

/// Format a price, omitting it when unknown
pub fn format_price(price: f64) -> String {
    if price > 0.0 {
        format!("{price:.0} ₽")
    } else {
        "—".to_string()
    }
}

/// Render a 1..=5 rating as filled and empty dots
pub fn rating_dots(value: u8) -> String {
    let filled = usize::from(value.min(5));
    format!("{}{}", "●".repeat(filled), "○".repeat(5 - filled))
}

/// Shorten text to `width` characters, ending with an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
