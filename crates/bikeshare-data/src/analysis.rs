//! Statistics pipeline for one analysis cycle.
//!
//! Runs all four [`TripAnalyzer`] passes over a filtered table, timing each
//! one, and returns an [`AnalysisResult`] ready for the report renderer.
//! A failing pass never prevents the others from running.

use std::time::{Duration, Instant};

use bikeshare_core::error::Result;
use bikeshare_core::models::TripTable;
use tracing::debug;

use crate::analyzer::{DurationStats, StationStats, TravelTimeStats, TripAnalyzer, UserStats};

// ── Public types ──────────────────────────────────────────────────────────────

/// The outcome of one pass and how long it took.
#[derive(Debug)]
pub struct PassOutcome<T> {
    pub result: Result<T>,
    /// Wall-clock time spent in the pass.
    pub elapsed: Duration,
}

impl<T> PassOutcome<T> {
    /// Run `pass`, recording its wall-clock time.
    pub fn measure(pass: impl FnOnce() -> Result<T>) -> Self {
        let start = Instant::now();
        let result = pass();
        Self {
            result,
            elapsed: start.elapsed(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything the report shows for one filtered dataset.
#[derive(Debug)]
pub struct AnalysisResult {
    /// Number of trips the passes ran over.
    pub trips_analyzed: usize,
    pub travel_times: PassOutcome<TravelTimeStats>,
    pub stations: PassOutcome<StationStats>,
    pub durations: PassOutcome<DurationStats>,
    pub users: PassOutcome<UserStats>,
}

impl AnalysisResult {
    /// Number of passes that returned an error.
    pub fn failed_passes(&self) -> usize {
        [
            self.travel_times.is_ok(),
            self.stations.is_ok(),
            self.durations.is_ok(),
            self.users.is_ok(),
        ]
        .into_iter()
        .filter(|ok| !ok)
        .count()
    }

    /// Combined wall-clock time of the four passes.
    pub fn total_elapsed(&self) -> Duration {
        self.travel_times.elapsed
            + self.stations.elapsed
            + self.durations.elapsed
            + self.users.elapsed
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every statistics pass over `table`.
pub fn analyze_trips(table: &TripTable) -> AnalysisResult {
    let analyzer = TripAnalyzer::new(table);

    let result = AnalysisResult {
        trips_analyzed: table.len(),
        travel_times: PassOutcome::measure(|| analyzer.travel_times()),
        stations: PassOutcome::measure(|| analyzer.stations()),
        durations: PassOutcome::measure(|| analyzer.durations()),
        users: PassOutcome::measure(|| analyzer.users()),
    };

    debug!(
        "Analysed {} trips in {:?} ({} passes failed)",
        result.trips_analyzed,
        result.total_elapsed(),
        result.failed_passes()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::error::BikeshareError;
    use bikeshare_core::models::{Column, TripRecord};
    use bikeshare_core::time_utils::parse_timestamp;
    use std::collections::BTreeSet;

    fn table(columns: BTreeSet<Column>) -> TripTable {
        let mut record = TripRecord::new(0, parse_timestamp("2017-02-14 12:30:00").unwrap());
        record.start_station = Some("Lake St".into());
        record.end_station = Some("Wacker Dr".into());
        record.trip_duration = Some(75.0);
        record.user_type = Some("Customer".into());
        TripTable::new(vec![record], columns)
    }

    #[test]
    fn test_measure_records_result() {
        let outcome = PassOutcome::measure(|| Ok(42));
        assert!(outcome.is_ok());
        assert_eq!(outcome.result.unwrap(), 42);
    }

    #[test]
    fn test_all_passes_run() {
        let t = table(Column::ALL.into_iter().collect());
        let result = analyze_trips(&t);
        assert_eq!(result.trips_analyzed, 1);
        assert_eq!(result.failed_passes(), 0);
        assert_eq!(result.travel_times.result.unwrap().hour.value, 12);
    }

    #[test]
    fn test_failing_pass_does_not_stop_others() {
        let columns = Column::ALL
            .into_iter()
            .filter(|c| *c != Column::TripDuration)
            .collect();
        let result = analyze_trips(&table(columns));

        assert_eq!(result.failed_passes(), 1);
        assert!(matches!(
            result.durations.result,
            Err(BikeshareError::FieldMissing(Column::TripDuration))
        ));
        assert!(result.travel_times.is_ok());
        assert!(result.stations.is_ok());
        assert!(result.users.is_ok());
    }

    #[test]
    fn test_empty_table_fails_every_pass() {
        let empty = TripTable::new(Vec::new(), Column::ALL.into_iter().collect());
        let result = analyze_trips(&empty);
        assert_eq!(result.trips_analyzed, 0);
        assert_eq!(result.failed_passes(), 4);
    }
}
