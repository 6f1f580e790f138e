//! Text formatting for widget values

use chrono::Duration;

/// Format a dollar amount, switching to cents below one cent
///
/// # Examples
/// ```
/// use cstatus_terminal::format::format_cost;
///
/// assert_eq!(format_cost(0.004), "0.4¢");
/// assert_eq!(format_cost(1.5), "$1.50");
/// ```
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("{:.1}¢", cost * 100.0)
    } else {
        format!("${:.2}", cost)
    }
}

/// Format a token count with a K or M suffix above one thousand
pub fn format_tokens(tokens: u64) -> String {
    if tokens > 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens > 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

/// Share of the context window in use, rounded to a whole percent
pub fn format_context(context_length: u64, context_window: u64) -> String {
    if context_length == 0 {
        return "0 ctx".to_string();
    }
    let percentage = if context_window == 0 {
        0.0
    } else {
        context_length as f64 / context_window as f64 * 100.0
    };
    format!("{} ({:.0}%)", format_tokens(context_length), percentage)
}

/// Format as `Nm`, `Nhr` or `Nhr Nm`; negative durations show as `0m`
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours == 0 {
        format!("{}m", minutes)
    } else if minutes == 0 {
        format!("{}hr", hours)
    } else {
        format!("{}hr {}m", hours, minutes)
    }
}

/// Like [`format_duration`] but shows `<1m` for anything under a minute
pub fn format_session_duration(duration: Duration) -> String {
    if duration < Duration::minutes(1) {
        "<1m".to_string()
    } else {
        format_duration(duration)
    }
}
