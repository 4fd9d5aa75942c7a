use crate::utils::error::{ApiError, Result};
use chrono::format::{Item, Parsed, StrftimeItems};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt::Write;

// Format of the session date override supplied through configuration.
pub const SESSION_DATE_FORMAT: &str = "%d-%m-%Y";

// The final day of a tax year is 5th April.
const TAX_YEAR_END_MONTH: u32 = 4;
const TAX_YEAR_END_DAY: u32 = 5;

/// Source of "today". Injected wherever the current date matters so tests
/// and session runs can pin the clock instead of patching global state.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Host clock with an optional fixed override. The override string is parsed
/// on every read; an unparsable value logs a warning and falls back to the
/// host clock rather than failing.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    session_date: Option<String>,
}

impl SessionClock {
    pub fn new(session_date: Option<String>) -> Self {
        Self { session_date }
    }
}

impl Clock for SessionClock {
    fn now(&self) -> NaiveDate {
        match &self.session_date {
            Some(raw) => match parse_date(raw, SESSION_DATE_FORMAT) {
                Ok(date) => {
                    tracing::debug!("session date has been set to [{}]", date);
                    date
                }
                Err(_) => {
                    tracing::warn!(
                        "unable to parse session date [{}], system date used instead",
                        raw
                    );
                    SystemClock.now()
                }
            },
            None => SystemClock.now(),
        }
    }
}

pub fn current_tax_year(clock: &dyn Clock) -> String {
    tax_year(clock.now())
}

/// Tax year label for a date. The tax year runs 6th April to 5th April and
/// is labelled by its ending calendar year; the boundary comparison is
/// strictly-after.
pub fn tax_year(date: NaiveDate) -> String {
    let year = date.year();
    let tax_year_end = NaiveDate::from_ymd_opt(year, TAX_YEAR_END_MONTH, TAX_YEAR_END_DAY)
        .expect("5 April is a valid date in every year");

    if date > tax_year_end {
        (year + 1).to_string()
    } else {
        year.to_string()
    }
}

// Compiles a strftime mask, rejecting empty masks and unknown specifiers.
fn format_items(format: &str) -> Result<Vec<Item<'_>>> {
    if format.is_empty() {
        return Err(ApiError::internal("empty date format"));
    }
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.contains(&Item::Error) {
        return Err(ApiError::internal(format!("invalid date format {format}")));
    }
    Ok(items)
}

/// Strict validity check: false for empty input or format, an illegal mask,
/// or any input that does not parse (overflow components such as day 40 are
/// rejected, never rolled over). Short-digit components the mask admits are
/// accepted.
pub fn is_valid_date(input: &str, format: &str) -> bool {
    if input.is_empty() || format.is_empty() {
        tracing::debug!("empty input date [{}] or format [{}]", input, format);
        return false;
    }
    let Ok(items) = format_items(format) else {
        tracing::debug!("invalid date format {}", format);
        return false;
    };

    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, input, items.iter()).is_ok()
        && parsed.to_naive_date().is_ok()
}

/// Parses a date string under a strftime mask. Unlike [`is_valid_date`] the
/// failure modes here are hard `Internal` errors: utility misuse, not client
/// input validation.
pub fn parse_date(input: &str, format: &str) -> Result<NaiveDate> {
    if input.is_empty() || format.is_empty() {
        tracing::warn!("empty input date [{}] or format [{}]", input, format);
        return Err(ApiError::internal(format!(
            "empty input date [{input}] or format [{format}]"
        )));
    }
    let items = format_items(format)?;

    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, input, items.iter())
        .and_then(|()| parsed.to_naive_date())
        .map_err(|e| {
            tracing::warn!("unable to parse {} using format {}", input, format);
            ApiError::internal(format!("unable to parse {input} using format {format}"))
                .with_source(e)
        })
}

/// Renders a date under a strftime mask. Empty or illegal masks, and masks
/// the value cannot satisfy, are `Internal` errors.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let items = format_items(format)?;

    let mut out = String::new();
    match write!(out, "{}", date.format_with_items(items.iter())) {
        Ok(()) => Ok(out),
        Err(_) => Err(ApiError::internal(format!(
            "unable to format {date} using format {format}"
        ))),
    }
}

/// True iff `start` strictly precedes `end`; both are parsed with
/// [`parse_date`], propagating its failure modes.
pub fn is_before(start: &str, end: &str, format: &str) -> Result<bool> {
    Ok(parse_date(start, format)? < parse_date(end, format)?)
}

/// Whole-day difference check: true iff `0 < end - start < max_days`. Equal
/// dates, reversed order, exact-threshold gaps and non-positive thresholds
/// are all false.
pub fn within_day_threshold(start: NaiveDate, end: NaiveDate, max_days: i64) -> bool {
    tracing::debug!(
        "comparing start date {} with end date {} using duration in days of {}",
        start,
        end,
        max_days
    );
    let days = (end - start).num_days();
    days > 0 && days < max_days
}

/// String-input variant of [`within_day_threshold`].
pub fn dates_within_threshold(
    start: &str,
    end: &str,
    format: &str,
    max_days: i64,
) -> Result<bool> {
    let start = parse_date(start, format)?;
    let end = parse_date(end, format)?;
    Ok(within_day_threshold(start, end, max_days))
}

/// Splits an 8-character YYYYMMDD (or YYYYDDMM) string with a delimiter
/// after positions 4 and 6. The numeric content is not validated; inputs
/// shorter than 8 bytes yield `None`.
pub fn delimit_date(raw: &str, delimiter: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let year = raw.get(0..4)?;
    let mid = raw.get(4..6)?;
    let end = raw.get(6..8)?;
    Some(format!("{year}{delimiter}{mid}{delimiter}{end}"))
}
