use chrono::NaiveTime;

/// Parse an API timing string into a time of day. The API sometimes appends
/// a timezone hint ("04:23 (+06)"), so only the leading token counts.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let token = s.split_whitespace().next()?;
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format a duration in seconds as a ticking "HH:MM:SS" countdown.
pub fn format_countdown(secs: i64) -> String {
    let secs = secs.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
