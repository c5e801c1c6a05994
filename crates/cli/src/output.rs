//! Terminal output utilities
//!
//! Status lines go to stderr so that stdout stays clean for results.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message);
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
        eprintln!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// One row of a ranked result table.
///
/// `score` is colored by how close it is to `max`.
pub fn result_row(rank: usize, score: u32, max: u32, id: u64, name: &str, location: &str) -> String {
    let ratio = if max == 0 { 0.0 } else { score as f64 / max as f64 };
    let score_text = format!("{:>3}", score);
    let score_text = if ratio >= 0.6 {
        score_text.green().to_string()
    } else if ratio >= 0.3 {
        score_text.yellow().to_string()
    } else {
        score_text.dimmed().to_string()
    };

    format!(
        "{:>3}. {}  {}  {}  {}",
        rank,
        score_text,
        format!("#{:<6}", id).dimmed(),
        truncate(name, 40),
        location.dimmed()
    )
}

/// One row of an unranked listing table.
pub fn listing_row(id: u64, name: &str, kind: &str, location: &str) -> String {
    format!(
        "{}  {:<40}  {:<8}  {}",
        format!("#{:<6}", id).dimmed(),
        truncate(name, 40),
        kind,
        location.dimmed()
    )
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
