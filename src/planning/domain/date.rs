//! Event date rules: explicit dates in descriptions and correction of
//! AI-proposed dates.

use chrono::{Months, NaiveDate};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Accepted year range for dates written in descriptions.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

const MONTH_NAMES: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

#[derive(Debug, Clone, Copy)]
enum Layout {
    YearMonthDay,
    MonthDayYear,
    MonthNameDayYear,
    DayMonthNameYear,
}

static PATTERNS: LazyLock<Vec<(Regex, Layout)>> = LazyLock::new(|| {
    let sources = [
        (
            r"(\d{4})\s*年\s*(\d{1,2})\s*月\s*(\d{1,2})\s*日".to_owned(),
            Layout::YearMonthDay,
        ),
        (r"(\d{4})-(\d{1,2})-(\d{1,2})".to_owned(), Layout::YearMonthDay),
        (r"(\d{4})/(\d{1,2})/(\d{1,2})".to_owned(), Layout::YearMonthDay),
        (
            r"(\d{1,2})\s*月\s*(\d{1,2})\s*日.*?(\d{4})\s*年".to_owned(),
            Layout::MonthDayYear,
        ),
        (
            format!(r"(?i)({MONTH_NAMES})\s+(\d{{1,2}}),?\s+(\d{{4}})"),
            Layout::MonthNameDayYear,
        ),
        (
            format!(r"(?i)(\d{{1,2}})\s+({MONTH_NAMES})\s+(\d{{4}})"),
            Layout::DayMonthNameYear,
        ),
    ];
    sources
        .into_iter()
        .filter_map(|(source, layout)| Regex::new(&source).ok().map(|regex| (regex, layout)))
        .collect()
});

fn group<'t>(captures: &Captures<'t>, index: usize) -> Option<&'t str> {
    captures.get(index).map(|found| found.as_str())
}

fn number(captures: &Captures<'_>, index: usize) -> Option<u32> {
    group(captures, index)?.parse().ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn date_from(captures: &Captures<'_>, layout: Layout) -> Option<NaiveDate> {
    let (year, month, day) = match layout {
        Layout::YearMonthDay => (number(captures, 1)?, number(captures, 2)?, number(captures, 3)?),
        Layout::MonthDayYear => (number(captures, 3)?, number(captures, 1)?, number(captures, 2)?),
        Layout::MonthNameDayYear => (
            number(captures, 3)?,
            month_from_name(group(captures, 1)?)?,
            number(captures, 2)?,
        ),
        Layout::DayMonthNameYear => (
            number(captures, 3)?,
            month_from_name(group(captures, 2)?)?,
            number(captures, 1)?,
        ),
    };
    let calendar_year = i32::try_from(year).ok().filter(|value| YEAR_RANGE.contains(value))?;
    NaiveDate::from_ymd_opt(calendar_year, month, day)
}

/// Finds an explicit calendar date in a free-text description.
///
/// Recognises `2026年1月1日`, `2026-01-01`, `2026/01/01`, `1月1日 … 2026年`,
/// `January 1, 2026` and `1 January 2026`. Patterns are tried in that order;
/// a match that is not a real calendar date falls through to the next
/// pattern.
#[must_use]
pub fn extract_requested_date(text: &str) -> Option<NaiveDate> {
    PATTERNS.iter().find_map(|(regex, layout)| {
        regex
            .captures(text)
            .and_then(|captures| date_from(&captures, *layout))
    })
}

/// Inputs for settling the date of a generated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRules {
    /// Current calendar date.
    pub today: NaiveDate,
    /// Date the organizer asked for, which always wins.
    pub requested: Option<NaiveDate>,
    /// Months added to today when the AI proposes a past date.
    pub past_date_shift_months: u32,
}

impl DateRules {
    /// Returns the final event date.
    ///
    /// A requested date overrides the AI date. Otherwise an ISO `YYYY-MM-DD`
    /// AI date before today moves to today plus the configured shift, and an
    /// unparsable AI date is dropped.
    #[must_use]
    pub fn settle(&self, ai_date: Option<&str>) -> Option<NaiveDate> {
        if let Some(requested) = self.requested {
            return Some(requested);
        }
        let proposed = NaiveDate::parse_from_str(ai_date?.trim(), "%Y-%m-%d").ok()?;
        if proposed >= self.today {
            return Some(proposed);
        }
        tracing::debug!(%proposed, today = %self.today, "moving past plan date forward");
        self.today
            .checked_add_months(Months::new(self.past_date_shift_months))
            .or(Some(proposed))
    }

    /// Earliest date suggested to the AI when no date was requested.
    #[must_use]
    pub fn earliest_suggestion(&self) -> NaiveDate {
        self.today
            .checked_add_months(Months::new(self.past_date_shift_months))
            .unwrap_or(self.today)
    }

    /// Latest date suggested to the AI when no date was requested.
    #[must_use]
    pub fn latest_suggestion(&self) -> NaiveDate {
        self.today
            .checked_add_months(Months::new(self.past_date_shift_months.saturating_mul(2)))
            .unwrap_or(self.today)
    }
}
