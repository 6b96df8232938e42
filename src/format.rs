use chrono::{DateTime, FixedOffset};
use unicode_width::UnicodeWidthStr;

const JIRA_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const DATE_TIME_OUT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_HUMAN_OUT: &str = "%a, %d %b %y";

pub const ELLIPSIS: char = '…';

/// Timestamp layouts served by the remote API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateLayout {
    /// `2020-12-07T16:12:00.000Z`, used by the agile endpoints (sprints).
    Rfc3339,
    /// `2020-12-13T14:05:20.974+0100`, used by issues and worklogs.
    Jira,
}

impl DateLayout {
    fn parse(self, dt: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(dt).ok(),
            DateLayout::Jira => DateTime::parse_from_str(dt, JIRA_LAYOUT)
                .or_else(|_| DateTime::parse_from_rfc3339(dt))
                .ok(),
        }
    }
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, keeping its original offset.
/// Unparseable input is returned as a single line.
pub fn format_date_time(dt: &str, layout: DateLayout) -> String {
    format_with(dt, layout, DATE_TIME_OUT)
}

/// Formats a timestamp as `Mon, 02 Jan 06`. Unparseable input is returned as a single line.
pub fn format_date_time_human(dt: &str, layout: DateLayout) -> String {
    format_with(dt, layout, DATE_HUMAN_OUT)
}

fn format_with(dt: &str, layout: DateLayout, out: &str) -> String {
    if dt.is_empty() {
        return String::new();
    }
    match layout.parse(dt) {
        Some(t) => t.format(out).to_string(),
        None => single_line(dt),
    }
}

/// Collapses tabs and line breaks into single spaces so a value always fits one cell.
pub fn single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.chars() {
        if c == '\t' || c == '\n' || c == '\r' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = c == ' ';
        }
    }
    out
}

/// Single-line, trimmed title.
pub fn prepare_title(text: &str) -> String {
    single_line(text.trim())
}

/// Cuts `s` to at most `max_width` display columns, ending with an ellipsis when shortened.
/// Never splits a character.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Measured on the whole prefix: a variation selector can widen the character before it.
    let budget = max_width - 1;
    let mut out = String::new();
    for c in s.chars() {
        out.push(c);
        if out.width() > budget {
            out.pop();
            break;
        }
    }
    out.push(ELLIPSIS);
    out
}
