//! One filter → load → analyze cycle.
//!
//! [`CycleOrchestrator`] ties the [`DataManager`] to the statistics
//! pipeline. The UI layer calls [`CycleOrchestrator::run_cycle`] once per
//! session iteration and renders the returned [`AnalysisCycle`].

use std::time::Duration;

use bikeshare_core::error::Result;
use bikeshare_core::models::{TripFilter, TripTable};
use bikeshare_data::analysis::{analyze_trips, AnalysisResult};

use crate::data_manager::DataManager;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything produced by one successful cycle.
///
/// The table is kept so the raw data browser can page through it after the
/// report; both are dropped together when the cycle ends.
#[derive(Debug)]
pub struct AnalysisCycle {
    pub filter: TripFilter,
    pub table: TripTable,
    pub analysis: AnalysisResult,
    /// Time spent reading and filtering the source file.
    pub load_time: Duration,
}

// ── CycleOrchestrator ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CycleOrchestrator {
    data: DataManager,
}

impl CycleOrchestrator {
    pub fn new(data: DataManager) -> Self {
        Self { data }
    }

    /// Load the dataset for `filter` and run every statistics pass on it.
    ///
    /// Fails only when the dataset cannot be loaded; pass failures are
    /// carried inside the returned [`AnalysisResult`].
    pub fn run_cycle(&self, filter: TripFilter) -> Result<AnalysisCycle> {
        let (table, load_time) = self.data.load(&filter)?;
        let analysis = analyze_trips(&table);

        tracing::debug!(
            city = %filter.city,
            month = %filter.month,
            day = %filter.day,
            trips = analysis.trips_analyzed,
            failed_passes = analysis.failed_passes(),
            "analysis cycle finished"
        );

        Ok(AnalysisCycle {
            filter,
            table,
            analysis,
            load_time,
        })
    }
}
