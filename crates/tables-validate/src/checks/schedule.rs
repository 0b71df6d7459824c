//! Operating hours check.
//!
//! The `operating_days_hours` field is free text of the form
//!
//! ```text
//! CET
//! 00.00-24.00
//! ```
//!
//! The first line is a timezone abbreviation, the second a schedule in one of
//! three grammars (see [`ScheduleGrammar`]). Further lines are ignored.

use std::sync::LazyLock;

use regex::Regex;
use tables_model::{Field, Issue, RecordSet, Violation};

use super::CheckOutcome;
use crate::config::{AuditConfig, ScheduleMatch};

/// `24h`, `12h`
static HOUR_COUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-2][0-4]h").expect("Invalid hour count regex"));

/// `00.00-24.00`
static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-2][0-9]\.[0-5][0-9]-[0-2][0-9]\.[0-5][0-9]").expect("Invalid time range regex")
});

/// `00-24`
static HOUR_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-2][0-4]-[0-2][0-4]").expect("Invalid hour range regex"));

/// Accepted shapes of the schedule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleGrammar {
    /// Hour count such as `24h`.
    HourCount,
    /// Minute-precision range such as `00.00-24.00`.
    TimeRange,
    /// Hour range such as `00-24`.
    HourRange,
}

impl ScheduleGrammar {
    /// Grammars in the order they are tried.
    pub const ALL: [ScheduleGrammar; 3] = [
        ScheduleGrammar::HourCount,
        ScheduleGrammar::TimeRange,
        ScheduleGrammar::HourRange,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            Self::HourCount => &HOUR_COUNT_REGEX,
            Self::TimeRange => &TIME_RANGE_REGEX,
            Self::HourRange => &HOUR_RANGE_REGEX,
        }
    }

    /// True when the grammar matches at the start of `token`.
    ///
    /// With [`ScheduleMatch::Prefix`] anything after the match is ignored, so
    /// `24h, closed Sundays` is accepted. A day list in front of the hours
    /// (`Mon,Tue:16.50-00.55`) is not, since the match is anchored at the start.
    pub fn matches(&self, token: &str, mode: ScheduleMatch) -> bool {
        self.regex().find(token).is_some_and(|found| match mode {
            ScheduleMatch::Prefix => true,
            ScheduleMatch::Full => found.end() == token.len(),
        })
    }
}

/// First grammar matching `token`, if any.
pub fn classify_schedule(token: &str, mode: ScheduleMatch) -> Option<ScheduleGrammar> {
    ScheduleGrammar::ALL
        .into_iter()
        .find(|grammar| grammar.matches(token, mode))
}

/// A successfully parsed operating hours value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingHours<'a> {
    /// First line, trimmed.
    pub timezone: &'a str,
    /// Second line, untrimmed.
    pub schedule: &'a str,
    pub grammar: ScheduleGrammar,
}

/// Parse and validate an operating hours value.
///
/// An unset value is treated like the one-line `"None"` it is exported as.
pub fn parse_operating_hours<'a>(
    value: Option<&'a str>,
    config: &AuditConfig,
) -> Result<OperatingHours<'a>, Issue> {
    let lines = split_lines(value.unwrap_or(tables_model::MISSING_SENTINEL));
    let [first, second, ..] = lines[..] else {
        return Err(Issue::ScheduleTooShort);
    };

    let timezone = first.trim_matches(is_blank);
    if !config.accepts_timezone(timezone) {
        return Err(Issue::InvalidTimezone {
            timezone: timezone.to_string(),
        });
    }

    let schedule = second;
    let Some(grammar) = classify_schedule(schedule, config.schedule_match) else {
        return Err(Issue::InvalidWorkingHours {
            working_hours: schedule.to_string(),
        });
    };

    Ok(OperatingHours {
        timezone,
        schedule,
        grammar,
    })
}

/// Collect records whose operating hours are malformed.
///
/// Records listed in the configured exceptions are skipped outright.
pub fn check(records: &RecordSet, config: &AuditConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    for (record_id, record) in records {
        if config.is_exempt(record_id) {
            continue;
        }

        if let Err(issue) = parse_operating_hours(record.get(Field::OperatingDaysHours), config) {
            outcome.fail(record_id, record, Violation::new(record_id.as_str(), issue));
        }
    }

    outcome
}

/// Split on line boundaries, dropping the terminators.
///
/// Recognizes `\n`, `\r\n`, `\r` and the other Unicode line separators a
/// tracker text field may carry. A trailing terminator does not produce an
/// empty last line; an empty input has no lines.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r'
            && let Some((next_idx, '\n')) = chars.peek().copied()
        {
            chars.next();
            start = next_idx + 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Whitespace stripped around the timezone, including the C0 separators
/// `char::is_whitespace` leaves alone.
fn is_blank(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\u{1c}'..='\u{1f}')
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
