/// Timestamp handling for upstream publish dates and stored entries.
///
/// Entries store creation time as RFC 3339 UTC with second precision
/// (`2025-01-02T03:04:05Z`). That form is fixed-width, so lexical and
/// chronological order agree.
pub mod time {
    use chrono::{DateTime, SecondsFormat, Utc};

    /// Parse an upstream `pubDate`: RFC 2822 (numeric or named zone), then RFC 3339.
    pub fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc2822(value)
            .or_else(|_| DateTime::parse_from_rfc3339(value))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Creation timestamp for a new entry; "now" when the publish date is unusable.
    pub fn entry_created_at(pub_date: &str) -> String {
        let created = parse_pub_date(pub_date).unwrap_or_else(Utc::now);
        format_created_at(created)
    }

    pub fn format_created_at(value: DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// RFC 1123 with a numeric zone, always in UTC.
    pub fn format_rss_date(value: DateTime<Utc>) -> String {
        value.format("%a, %d %b %Y %H:%M:%S %z").to_string()
    }
}
