//! Lenient date parsing and checked formatting
//!
//! Patterns are strftime-style strings interpreted by chrono. Parsing is
//! lenient over numeric fields: out-of-range components are normalized by
//! rolling over instead of rejected. The rollover rule is documented on
//! [`parse_date`].

use std::fmt::Write as _;

use chrono::format::{Item, Numeric, StrftimeItems};
use chrono::{Days, NaiveDate};

use crate::error::DateError;

/// Default pattern for parsing incoming release-date strings.
pub const DEFAULT_PARSE_PATTERN: &str = "%Y-%m-%d";

/// Default pattern for rendering a release date into comments.
pub const DEFAULT_FORMAT_PATTERN: &str = "%B %d, %Y";

/// Check whether the pattern expands as a strftime pattern.
pub fn pattern_is_valid(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Parse `input` against `pattern`, leniently.
///
/// A strictly valid date is returned as-is. When strict parsing fails and
/// the pattern consists of numeric date fields, the raw components are
/// resolved by rollover: excess months roll into following years, and the
/// resulting date is the first day of the resolved month plus (day - 1)
/// days. "2024-02-30" therefore resolves to 2024-03-01, a day of 32 rolls
/// into the next month, and a day of zero rolls back to the previous
/// month's last day. Patterns containing non-numeric date fields (month
/// names and the like) are parsed strictly only.
pub fn parse_date(input: &str, pattern: &str) -> Result<NaiveDate, DateError> {
    if !pattern_is_valid(pattern) {
        return Err(DateError::InvalidPattern(pattern.to_string()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
        return Ok(date);
    }
    let raw = scan_numeric_fields(input, pattern).ok_or_else(|| DateError::ParseFailed {
        input: input.to_string(),
        pattern: pattern.to_string(),
    })?;
    resolve_rollover(raw).ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

/// Format `date` with `pattern`.
///
/// Fails cleanly when the pattern is malformed or does not apply to a
/// plain calendar date (time-of-day fields, for example).
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String, DateError> {
    if !pattern_is_valid(pattern) {
        return Err(DateError::InvalidPattern(pattern.to_string()));
    }
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(pattern))
        .map_err(|_| DateError::FormatFailed(pattern.to_string()))?;
    Ok(rendered)
}

/// Raw date components before rollover resolution
struct RawDate {
    year: i64,
    month: i64,
    day: i64,
}

/// Match `input` against the pattern's items, collecting year, month and
/// day values without range checks. Returns `None` when the pattern uses
/// fields other than numeric year/month/day or the input does not match.
fn scan_numeric_fields(input: &str, pattern: &str) -> Option<RawDate> {
    let mut rest = input;
    let mut year = None;
    let mut month = None;
    let mut day = None;

    for item in StrftimeItems::new(pattern) {
        match item {
            Item::Literal(literal) => rest = rest.strip_prefix(literal)?,
            Item::OwnedLiteral(literal) => rest = rest.strip_prefix(&*literal)?,
            Item::Space(_) | Item::OwnedSpace(_) => rest = rest.trim_start(),
            Item::Numeric(field, _) => {
                let signed = field == Numeric::Year;
                let (value, tail) = take_number(rest, signed)?;
                rest = tail;
                match field {
                    Numeric::Year => year = Some(value),
                    Numeric::YearMod100 => year = Some(expand_two_digit_year(value)),
                    Numeric::Month => month = Some(value),
                    Numeric::Day => day = Some(value),
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    if !rest.is_empty() {
        return None;
    }
    Some(RawDate {
        year: year?,
        month: month?,
        day: day?,
    })
}

/// Read a decimal number off the front of `input`
fn take_number(input: &str, signed: bool) -> Option<(i64, &str)> {
    let bytes = input.as_bytes();
    let mut end = 0;
    if signed && bytes.first() == Some(&b'-') {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    let value = input[..end].parse().ok()?;
    Some((value, &input[end..]))
}

/// Two-digit years follow the usual strftime convention: 00-68 map into
/// the 2000s, 69-99 into the 1900s.
fn expand_two_digit_year(value: i64) -> i64 {
    match value {
        0..=68 => value + 2000,
        69..=99 => value + 1900,
        _ => value,
    }
}

/// Resolve raw components into a date by rolling over excess months and
/// days instead of rejecting them.
fn resolve_rollover(raw: RawDate) -> Option<NaiveDate> {
    let months = raw.month - 1;
    let year = i32::try_from(raw.year + months.div_euclid(12)).ok()?;
    let month = months.rem_euclid(12) as u32 + 1;
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;

    let day_offset = raw.day - 1;
    if day_offset >= 0 {
        first_of_month.checked_add_days(Days::new(day_offset as u64))
    } else {
        first_of_month.checked_sub_days(Days::new(day_offset.unsigned_abs()))
    }
}
