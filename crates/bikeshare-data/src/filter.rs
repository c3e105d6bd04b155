use bikeshare_core::models::{TripFilter, TripRecord, TripTable};

/// Whether `record` passes both the month and the day predicate of `filter`.
pub fn matches(record: &TripRecord, filter: &TripFilter) -> bool {
    let cal = record.calendar();
    filter.month.accepts(cal.month) && filter.day.accepts(cal.weekday)
}

/// Keep only the trips that pass `filter`. The city is not consulted: the
/// table is assumed to come from that city's file already.
pub fn apply_filters(mut table: TripTable, filter: &TripFilter) -> TripTable {
    table.records.retain(|record| matches(record, filter));
    table
}
