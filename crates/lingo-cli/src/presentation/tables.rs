//! Table formatting utilities for CLI output.

/// Truncates a string to at most `max_chars` characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use lingo_cli::presentation::truncate_chars;
///
/// assert_eq!(truncate_chars("Hello", 10), "Hello");
/// assert_eq!(truncate_chars("Hello World", 8), "Hello...");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}
