use std::sync::OnceLock;
use chrono::{DateTime, FixedOffset, TimeZone};
use regex::Regex;

pub const KB: u64 = 1_000;
pub const MB: u64 = 1_000_000;
pub const GB: u64 = 1_000_000_000;

const DATE_FORMAT: &str = "%b %d %Y %I:%M:%S %p";
const SHELL_PREFIX_REGEX: &str = r"^/bin/sh -c\s*(#\(nop\)\s*)?";
const SHORT_DIGEST_LENGTH: usize = 7;

/// Format a byte count using decimal units
/// # Example
/// ```
/// use regview::format::format_bytes;
/// assert_eq!(format_bytes(999), "999 B");
/// assert_eq!(format_bytes(1_500_000_000), "1.5 GB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// Same as [`format_bytes`] but passes an unknown size through
pub fn humanize(bytes: Option<u64>) -> Option<String> {
    bytes.map(format_bytes)
}

/// Render a timestamp as `Jan 02 2022 03:04:05 PM` in its own offset
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}

/// Parse an ISO-8601 timestamp and render it like [`format_date`]
pub fn format_date_str(date: &str) -> Option<String> {
    parse_date(date).map(|date| format_date(&date))
}

pub fn parse_date(date: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(date.trim()).ok()
}

fn shell_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(SHELL_PREFIX_REGEX).expect("Shell prefix pattern should be valid"))
}

/// Strip the `/bin/sh -c` (and `#(nop)`) prefix docker adds to build commands
/// # Example
/// ```
/// use regview::format::clean_command;
/// assert_eq!(clean_command("/bin/sh -c #(nop)  CMD [\"sh\"]"), "CMD [\"sh\"]");
/// ```
pub fn clean_command(command: &str) -> String {
    shell_prefix().replace(command.trim(), "").trim().to_string()
}

/// Shorten a digest (`sha256:<hex>`) to the first 7 characters of its hex part
pub fn short_digest(digest: &str) -> String {
    let hex = digest.split_once(':').map_or(digest, |(_, hex)| hex);
    hex.chars().take(SHORT_DIGEST_LENGTH).collect()
}
