//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Duration, Utc};

/// Length of generated invitation tokens
pub const INVITE_TOKEN_LENGTH: usize = 32;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Format a timestamp relative to `now` ("in 3 days", "2 hours ago")
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let (magnitude, future) = if diff < Duration::zero() {
        (-diff, true)
    } else {
        (diff, false)
    };

    let amount = if magnitude < Duration::minutes(1) {
        return "just now".to_string();
    } else if magnitude < Duration::hours(1) {
        format!("{} minutes", magnitude.num_minutes())
    } else if magnitude < Duration::days(1) {
        format!("{} hours", magnitude.num_hours())
    } else if magnitude < Duration::weeks(1) {
        format!("{} days", magnitude.num_days())
    } else {
        return format_timestamp(timestamp);
    };

    if future {
        format!("in {}", amount)
    } else {
        format!("{} ago", amount)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a ticket price; zero is shown as "Free"
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        "Free".to_string()
    } else {
        format!("${:.2}", price)
    }
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Generate a token for an invitation link
pub fn generate_invite_token() -> String {
    generate_random_string(INVITE_TOKEN_LENGTH)
}

/// Split a console line into arguments.
///
/// Whitespace separates arguments; single or double quotes group words and a
/// backslash escapes the next character.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_arg = true;
                }
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }

    args
}
