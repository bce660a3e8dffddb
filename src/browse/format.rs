use chrono::{DateTime, Datelike, NaiveDate};

const NOT_AVAILABLE: &str = "N/A";

fn parse_date(date: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive())
}

/// "1999-03-01" -> "March 1, 1999". Also accepts RFC 3339 timestamps.
/// Strings that are not dates come back unchanged.
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match parse_date(date) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

pub fn format_runtime(minutes: u32) -> String {
    if minutes == 0 {
        return NOT_AVAILABLE.to_string();
    }
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if hours == 0 {
        format!("{}m", remaining)
    } else {
        format!("{}h {}m", hours, remaining)
    }
}

pub fn format_vote_average(vote_average: f64) -> String {
    format!("{:.1}", vote_average)
}

/// Cuts `text` to `max_chars` characters and appends "...".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

pub fn year_from_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}
