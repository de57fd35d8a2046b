//! Utility functions for ML Provisioner
//!
//! This module provides utility functions used throughout the provisioner.

use std::time::Duration;

use crate::error::{Error, Result};

/// Formats a duration into a human-readable string
///
/// # Examples
///
/// ```
/// use common::utils::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs == 0 {
        return format!("{}ms", duration.subsec_millis());
    }

    let hours = total_secs / (60 * 60);
    let minutes = (total_secs % (60 * 60)) / 60;
    let seconds = total_secs % 60;

    let mut result = String::new();

    if hours > 0 {
        result.push_str(&format!("{}h ", hours));
    }

    if minutes > 0 || !result.is_empty() {
        result.push_str(&format!("{}m ", minutes));
    }

    result.push_str(&format!("{}s", seconds));

    result
}

/// Truncates a response body for log output
pub fn truncate_for_log(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }

    let truncated: String = body.chars().take(max_chars).collect();
    format!("{}... ({} chars total)", truncated, body.chars().count())
}

/// Percent-encodes an identifier for use as one URL path segment.
///
/// Empty, `.` and `..` are rejected since they would address another
/// resource once the URL is normalized.
pub fn path_segment(value: &str) -> Result<String> {
    match value.trim() {
        "" => Err(Error::InvalidArgument("empty identifier".to_string())),
        "." | ".." => Err(Error::InvalidArgument(format!("invalid identifier '{}'", value))),
        _ => Ok(urlencoding::encode(value).into_owned()),
    }
}
