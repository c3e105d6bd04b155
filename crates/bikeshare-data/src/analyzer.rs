//! The four statistics passes over a filtered trip table.
//!
//! Each pass reads the table and returns its own `Result`; a missing or
//! empty column fails only the pass (or, for user stats, the sub-section)
//! that needs it.

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{Column, TripTable};

use crate::aggregator::{mode, Breakdown, ValueCount};

// ── Result types ──────────────────────────────────────────────────────────────

/// Busiest month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelTimeStats {
    /// Month number, 1 (January) ..= 12.
    pub month: ValueCount<u32>,
    /// Weekday number, 0 (Monday) ..= 6.
    pub weekday: ValueCount<u32>,
    pub hour: ValueCount<u32>,
}

/// Most used start station, end station and start→end route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: ValueCount<String>,
    pub end_station: ValueCount<String>,
    /// Route in the form `"start->end"`.
    pub route: ValueCount<String>,
}

/// Total and mean of the non-null trip durations.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Trips with no duration value.
    pub missing: usize,
    pub total: f64,
    pub mean: f64,
}

/// Earliest, most recent and most common birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearSummary {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: ValueCount<i32>,
}

/// Birth-year figures; `summary` is `None` when no trip has a birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub missing: usize,
    pub summary: Option<BirthYearSummary>,
}

/// User demographics. The three sections fail independently.
#[derive(Debug)]
pub struct UserStats {
    pub user_types: Result<Breakdown<String>>,
    pub genders: Result<Breakdown<String>>,
    pub birth_years: Result<BirthYearStats>,
}

// ── TripAnalyzer ──────────────────────────────────────────────────────────────

/// Stateless statistics passes over a borrowed [`TripTable`].
pub struct TripAnalyzer<'a> {
    table: &'a TripTable,
}

impl<'a> TripAnalyzer<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self { table }
    }

    /// Mode of the derived month, weekday and hour.
    pub fn travel_times(&self) -> Result<TravelTimeStats> {
        self.require_rows()?;
        let calendars: Vec<_> = self.table.records.iter().map(|r| r.calendar()).collect();

        let month = mode(calendars.iter().map(|c| c.month))
            .ok_or(BikeshareError::FieldAllNull(Column::StartTime))?;
        let weekday = mode(calendars.iter().map(|c| c.weekday))
            .ok_or(BikeshareError::FieldAllNull(Column::StartTime))?;
        let hour = mode(calendars.iter().map(|c| c.hour))
            .ok_or(BikeshareError::FieldAllNull(Column::StartTime))?;

        Ok(TravelTimeStats {
            month,
            weekday,
            hour,
        })
    }

    /// Mode of start station, end station and route.
    ///
    /// Routes are built here from each trip's stations and discarded with
    /// the result; the table itself is left untouched.
    pub fn stations(&self) -> Result<StationStats> {
        self.require_rows()?;
        self.require_column(Column::StartStation)?;
        self.require_column(Column::EndStation)?;
        let records = &self.table.records;

        let start_station = mode(records.iter().filter_map(|r| r.start_station.as_deref()))
            .ok_or(BikeshareError::FieldAllNull(Column::StartStation))?;
        let end_station = mode(records.iter().filter_map(|r| r.end_station.as_deref()))
            .ok_or(BikeshareError::FieldAllNull(Column::EndStation))?;
        let route = mode(records.iter().filter_map(|r| r.route()))
            .ok_or(BikeshareError::FieldAllNull(Column::StartStation))?;

        Ok(StationStats {
            start_station: owned(start_station),
            end_station: owned(end_station),
            route,
        })
    }

    /// Null count, sum and mean of the trip durations.
    pub fn durations(&self) -> Result<DurationStats> {
        self.require_rows()?;
        self.require_column(Column::TripDuration)?;

        let mut missing = 0usize;
        let mut total = 0.0f64;
        let mut present = 0usize;
        for record in &self.table.records {
            match record.trip_duration {
                Some(d) => {
                    total += d;
                    present += 1;
                }
                None => missing += 1,
            }
        }

        if present == 0 {
            return Err(BikeshareError::FieldAllNull(Column::TripDuration));
        }

        Ok(DurationStats {
            missing,
            total,
            mean: total / present as f64,
        })
    }

    /// User type, gender and birth-year figures.
    pub fn users(&self) -> Result<UserStats> {
        self.require_rows()?;
        Ok(UserStats {
            user_types: self.user_types(),
            genders: self.genders(),
            birth_years: self.birth_years(),
        })
    }

    fn user_types(&self) -> Result<Breakdown<String>> {
        self.require_column(Column::UserType)?;
        Ok(Breakdown::from_options(
            self.table.records.iter().map(|r| r.user_type.clone()),
        ))
    }

    fn genders(&self) -> Result<Breakdown<String>> {
        self.require_column(Column::Gender)?;
        Ok(Breakdown::from_options(
            self.table.records.iter().map(|r| r.gender.clone()),
        ))
    }

    fn birth_years(&self) -> Result<BirthYearStats> {
        self.require_column(Column::BirthYear)?;
        let years = Breakdown::from_options(self.table.records.iter().map(|r| r.birth_year));

        let summary = match (
            years.counts.iter().map(|c| c.value).min(),
            years.counts.iter().map(|c| c.value).max(),
            years.mode(),
        ) {
            (Some(earliest), Some(most_recent), Some(most_common)) => Some(BirthYearSummary {
                earliest,
                most_recent,
                most_common: most_common.clone(),
            }),
            _ => None,
        };

        Ok(BirthYearStats {
            missing: years.missing,
            summary,
        })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn require_rows(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(BikeshareError::EmptyDataset);
        }
        Ok(())
    }

    fn require_column(&self, column: Column) -> Result<()> {
        if !self.table.has_column(column) {
            return Err(BikeshareError::FieldMissing(column));
        }
        Ok(())
    }
}

fn owned(count: ValueCount<&str>) -> ValueCount<String> {
    ValueCount::new(count.value.to_string(), count.count)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
