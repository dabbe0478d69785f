use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::models::{FieldError, NewNote, NoteInput};

pub const TITLE_MAX_CHARS: usize = 255;

/// Check a note payload. Every rule runs; an empty result means valid.
pub fn validate(note: &NoteInput) -> Vec<FieldError> {
    check(note).err().unwrap_or_default()
}

/// Validate, then sanitize every field for storage.
pub fn prepare(note: &NoteInput) -> Result<NewNote, Vec<FieldError>> {
    let (title, text, datetime) = check(note)?;

    Ok(NewNote {
        title: sanitize(title),
        text: sanitize(text),
        datetime: sanitize(datetime),
    })
}

// A field is `Some` exactly when it passed, so the error list is non-empty
// whenever any field is missing.
fn check(note: &NoteInput) -> Result<(&str, &str, &str), Vec<FieldError>> {
    let title = note
        .title
        .as_str()
        .filter(|t| (1..=TITLE_MAX_CHARS).contains(&t.chars().count()));
    let text = note.text.as_str();
    let datetime = note.datetime.as_str().filter(|d| is_iso8601(d));

    let mut errors = Vec::new();
    if title.is_none() {
        errors.push(FieldError::new(
            "title",
            "Title must be a string of length 1 to 255 characters",
        ));
    }
    if text.is_none() {
        errors.push(FieldError::new("text", "Text must be a string"));
    }
    if datetime.is_none() {
        errors.push(FieldError::new(
            "datetime",
            "Datetime must be a ISO 8601 date",
        ));
    }

    match (title, text, datetime) {
        (Some(title), Some(text), Some(datetime)) => Ok((title, text, datetime)),
        _ => Err(errors),
    }
}

/// Escape characters that are significant in HTML.
///
/// An `&` that already starts a character reference is left alone, which
/// keeps the function idempotent: `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for (i, c) in value.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '&' if starts_char_reference(&value[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            c => out.push(c),
        }
    }

    out
}

// `s` starts with '&'
fn starts_char_reference(s: &str) -> bool {
    let rest = &s[1..];
    let body = match rest.find(';') {
        Some(end) if end <= 32 => &rest[..end],
        _ => return false,
    };

    match body.strip_prefix('#') {
        Some(num) => match num.strip_prefix(['x', 'X']) {
            Some(hex) => {
                (1..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => (1..=7).contains(&num.len()) && num.chars().all(|c| c.is_ascii_digit()),
        },
        None => !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

/// Whether `value` is an ISO 8601 date, optionally with a time of day and a
/// zone designator.
///
/// Dates: `YYYY`, `YYYY-MM`, calendar (`YYYY-MM-DD`, `YYYYMMDD`), week
/// (`YYYY-Www[-D]`, `YYYYWww[D]`) and ordinal (`YYYY-DDD`, `YYYYDDD`).
/// A complete date may be followed by `T` (or space) and `hh[:mm[:ss]]` /
/// `hh[mm[ss]]` with an optional `.` or `,` fraction, then an optional `Z`,
/// `±hh`, `±hhmm` or `±hh:mm`. `24:00` is accepted as end of day.
pub fn is_iso8601(value: &str) -> bool {
    let (date, time) = match value.find(['T', 't', ' ']) {
        Some(at) => (&value[..at], Some(&value[at + 1..])),
        None => (value, None),
    };

    match (parse_date(date), time) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(DatePrecision::Day), Some(time)) => is_time_with_zone(time),
        // Times only follow a complete date
        (Some(_), Some(_)) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DatePrecision {
    Year,
    Month,
    Week,
    Day,
}

fn parse_date(date: &str) -> Option<DatePrecision> {
    if !date.is_ascii() {
        return None;
    }

    let year = i32::try_from(number(date.get(..4)?)?).ok()?;
    let rest = &date[4..];
    let extended = rest.starts_with('-');
    let rest = rest.strip_prefix('-').unwrap_or(rest);

    if rest.is_empty() {
        return (!extended).then_some(DatePrecision::Year);
    }

    if let Some(week) = rest.strip_prefix('W') {
        return parse_week_date(year, week, extended);
    }

    let (month, day) = match (rest.len(), extended) {
        (2, true) => {
            return NaiveDate::from_ymd_opt(year, number(rest)?, 1).map(|_| DatePrecision::Month)
        }
        (3, _) => {
            return NaiveDate::from_yo_opt(year, number(rest)?).map(|_| DatePrecision::Day)
        }
        (4, false) => (&rest[..2], &rest[2..]),
        (5, true) if rest.as_bytes()[2] == b'-' => (&rest[..2], &rest[3..]),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, number(month)?, number(day)?).map(|_| DatePrecision::Day)
}

fn parse_week_date(year: i32, week: &str, extended: bool) -> Option<DatePrecision> {
    let (week, day) = match (week.len(), extended) {
        (2, _) => (week, None),
        (4, true) if week.as_bytes()[2] == b'-' => (&week[..2], Some(&week[3..])),
        (3, false) => (&week[..2], Some(&week[2..])),
        _ => return None,
    };

    let weekday = match day {
        Some(day) => match number(day)? {
            d @ 1..=7 => Weekday::try_from(u8::try_from(d - 1).ok()?).ok()?,
            _ => return None,
        },
        None => Weekday::Mon,
    };

    NaiveDate::from_isoywd_opt(year, number(week)?, weekday).map(|_| match day {
        Some(_) => DatePrecision::Day,
        None => DatePrecision::Week,
    })
}

fn is_time_with_zone(time: &str) -> bool {
    let (clock, zone) = if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        (clock, None)
    } else if let Some(at) = time.rfind(['+', '-']) {
        (&time[..at], Some(&time[at + 1..]))
    } else {
        (time, None)
    };

    if let Some(zone) = zone {
        if !is_zone_offset(zone) {
            return false;
        }
    }

    is_clock(clock)
}

fn is_clock(clock: &str) -> bool {
    let (clock, fraction) = match clock.find(['.', ',']) {
        Some(at) => (&clock[..at], Some(&clock[at + 1..])),
        None => (clock, None),
    };

    if fraction.is_some_and(|f| !all_digits(f)) {
        return false;
    }

    let parts: Vec<&str> = if clock.contains(':') {
        clock.split(':').collect()
    } else if all_digits(clock) && clock.len() % 2 == 0 {
        (0..clock.len()).step_by(2).map(|i| &clock[i..i + 2]).collect()
    } else {
        return false;
    };

    if !(1..=3).contains(&parts.len()) || parts.iter().any(|p| p.len() != 2) {
        return false;
    }

    let mut fields = [0u32; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        match number(part) {
            Some(n) => *slot = n,
            None => return false,
        }
    }
    let [hour, minute, second] = fields;

    if hour == 24 {
        return minute == 0
            && second == 0
            && fraction.map_or(true, |f| f.bytes().all(|b| b == b'0'));
    }

    NaiveTime::from_hms_opt(hour, minute, second).is_some()
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn number(s: &str) -> Option<u32> {
    if all_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

fn is_zone_offset(zone: &str) -> bool {
    if !zone.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return false;
    }

    let (hours, minutes) = match zone.len() {
        2 => (zone, "00"),
        4 => (&zone[..2], &zone[2..]),
        5 if zone.as_bytes()[2] == b':' => (&zone[..2], &zone[3..]),
        _ => return false,
    };

    match (hours.parse::<u8>(), minutes.parse::<u8>()) {
        (Ok(h), Ok(m)) => h <= 23 && m <= 59,
        _ => false,
    }
}
