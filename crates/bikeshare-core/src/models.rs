use chrono::{Month, NaiveDateTime, Weekday};
use std::collections::BTreeSet;
use std::fmt;

use crate::time_utils::CalendarFields;

// ── City ──────────────────────────────────────────────────────────────────────

/// The three cities a dataset is available for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in menu order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Map a menu code (1-3) to a city.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(City::Chicago),
            2 => Some(City::NewYorkCity),
            3 => Some(City::Washington),
            _ => None,
        }
    }

    /// Display name shown to the user.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the CSV backing this city.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Lookup tables ─────────────────────────────────────────────────────────────

/// Months offered by the month menu (codes 1-6).
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

/// Days offered by the day menu (codes 1-7), Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Lower-case name of a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

/// Lower-case name of a 0-based weekday number (Monday = 0).
pub fn weekday_name(weekday: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(usize::try_from(weekday).ok()?).copied()
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Restriction on one calendar axis: either everything or a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter<T> {
    All,
    Only(T),
}

pub type MonthFilter = PeriodFilter<Month>;
pub type DayFilter = PeriodFilter<Weekday>;

impl PeriodFilter<Month> {
    /// Code used by the month menu to mean "no month filter".
    pub const ALL_CODE: u32 = 7;

    /// Map a month menu code: 1-6 select a month, 7 selects all.
    pub fn from_code(code: u32) -> Option<Self> {
        if code == Self::ALL_CODE {
            return Some(PeriodFilter::All);
        }
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        FILTER_MONTHS.get(idx).map(|m| PeriodFilter::Only(*m))
    }

    /// Whether a derived month number (1-12) passes the filter.
    pub fn accepts(&self, month: u32) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::Only(m) => m.number_from_month() == month,
        }
    }
}

impl PeriodFilter<Weekday> {
    /// Code used by the day menu to mean "no day filter".
    pub const ALL_CODE: u32 = 8;

    /// Map a day menu code: 1-7 select Monday..Sunday, 8 selects all.
    pub fn from_code(code: u32) -> Option<Self> {
        if code == Self::ALL_CODE {
            return Some(PeriodFilter::All);
        }
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        WEEKDAYS.get(idx).map(|d| PeriodFilter::Only(*d))
    }

    /// Whether a derived weekday number (Monday = 0) passes the filter.
    pub fn accepts(&self, weekday: u32) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::Only(d) => d.num_days_from_monday() == weekday,
        }
    }
}

impl fmt::Display for PeriodFilter<Month> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::All => f.write_str("all"),
            PeriodFilter::Only(m) => f.write_str(month_name(m.number_from_month()).unwrap_or("?")),
        }
    }
}

impl fmt::Display for PeriodFilter<Weekday> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::All => f.write_str("all"),
            PeriodFilter::Only(d) => {
                f.write_str(weekday_name(d.num_days_from_monday()).unwrap_or("?"))
            }
        }
    }
}

/// A complete, validated filter selection.
///
/// A cancelled selection is represented by the absence of a `TripFilter`
/// (`Option::None`), so there is no partially-cancelled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    /// A filter that keeps every trip of `city`.
    pub fn all(city: City) -> Self {
        Self {
            city,
            month: PeriodFilter::All,
            day: PeriodFilter::All,
        }
    }
}

// ── Columns ───────────────────────────────────────────────────────────────────

/// Source columns the loader understands, identified by their CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    /// All known columns in source order.
    pub const ALL: [Column; 8] = [
        Column::StartTime,
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Columns without which a dataset cannot be loaded. Everything else
    /// is checked by the pass that reads it.
    pub const REQUIRED: [Column; 1] = [Column::StartTime];

    /// The CSV header text.
    pub fn header(self) -> &'static str {
        match self {
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::TripDuration => "Trip Duration",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }

    /// Look a header up, ignoring surrounding whitespace.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single bike rental.
///
/// The start time and the calendar fields derived from it are private so
/// the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// 0-based data row in the source file (header excluded).
    pub row: usize,
    start_time: NaiveDateTime,
    calendar: CalendarFields,
    /// End time exactly as written in the source, if any.
    pub end_time: Option<String>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Trip duration as stored in the source.
    pub trip_duration: Option<f64>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Create a record, deriving its calendar fields from `start_time`.
    pub fn new(row: usize, start_time: NaiveDateTime) -> Self {
        Self {
            row,
            start_time,
            calendar: CalendarFields::from_timestamp(&start_time),
            end_time: None,
            start_station: None,
            end_station: None,
            trip_duration: None,
            user_type: None,
            gender: None,
            birth_year: None,
        }
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn calendar(&self) -> CalendarFields {
        self.calendar
    }

    /// `"start->end"` when both stations are known.
    pub fn route(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(start), Some(end)) => Some(format!("{start}->{end}")),
            _ => None,
        }
    }
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// The in-memory trips of one analysis cycle plus the columns their source
/// actually provided.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    pub records: Vec<TripRecord>,
    pub columns: BTreeSet<Column>,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, columns: BTreeSet<Column>) -> Self {
        Self { records, columns }
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
