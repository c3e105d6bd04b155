//! City CSV discovery and loading.
//!
//! Resolves a [`City`] to its backing file, reads every trip row into a
//! [`TripRecord`] with its calendar fields derived, and records which
//! optional columns the file actually provides.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, LoadErrorKind, Result};
use bikeshare_core::models::{City, Column, TripFilter, TripRecord, TripTable};
use bikeshare_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::filter::apply_filters;

// ── Raw row ───────────────────────────────────────────────────────────────────

/// One CSV row as written in the source. Optional columns default to
/// `None` when the file does not have them; malformed numbers are read as
/// nulls.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", default, deserialize_with = "csv::invalid_option")]
    trip_duration: Option<f64>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default, deserialize_with = "csv::invalid_option")]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_record(self, row: usize) -> std::result::Result<TripRecord, LoadErrorKind> {
        let start_time =
            parse_timestamp(&self.start_time).ok_or_else(|| LoadErrorKind::Timestamp {
                row,
                value: self.start_time.clone(),
            })?;

        let mut record = TripRecord::new(row, start_time);
        record.end_time = self.end_time;
        record.trip_duration = self.trip_duration.filter(|d| d.is_finite());
        record.start_station = self.start_station;
        record.end_station = self.end_station;
        record.user_type = self.user_type;
        record.gender = self.gender;
        record.birth_year = self
            .birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.round() as i32);
        Ok(record)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Locate the CSV file for `city` under `data_dir`.
///
/// The file is looked for directly in `data_dir` first, then anywhere
/// beneath it; the first match in sorted path order wins.
pub fn find_city_file(data_dir: &Path, city: City) -> Option<PathBuf> {
    let direct = data_dir.join(city.file_name());
    if direct.is_file() {
        return Some(direct);
    }

    if !data_dir.is_dir() {
        warn!("Data directory does not exist: {}", data_dir.display());
        return None;
    }

    let mut matches: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == city.file_name())
        .map(|entry| entry.into_path())
        .collect();

    matches.sort();
    matches.into_iter().next()
}

/// Cities whose data file can be found under `data_dir`.
pub fn available_cities(data_dir: &Path) -> Vec<City> {
    City::ALL
        .into_iter()
        .filter(|city| find_city_file(data_dir, *city).is_some())
        .collect()
}

/// Read every trip in the CSV at `path`.
///
/// Fails with [`BikeshareError::Load`] when the file is missing or
/// unreadable, lacks a required column, has a broken row, or holds a start
/// time that cannot be parsed.
pub fn load_trips(path: &Path) -> Result<TripTable> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            BikeshareError::load(path, LoadErrorKind::NotFound)
        } else {
            BikeshareError::load(path, e)
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let columns: BTreeSet<Column> = reader
        .headers()
        .map_err(|e| BikeshareError::load(path, e))?
        .iter()
        .filter_map(Column::from_header)
        .collect();

    if let Some(missing) = Column::REQUIRED.into_iter().find(|c| !columns.contains(c)) {
        return Err(BikeshareError::load(
            path,
            LoadErrorKind::MissingColumn(missing),
        ));
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawTrip>().enumerate() {
        let raw = result.map_err(|e| BikeshareError::load(path, e))?;
        let record = raw
            .into_record(row)
            .map_err(|kind| BikeshareError::load(path, kind))?;
        records.push(record);
    }

    debug!(
        "Read {} trips with {} known columns from {}",
        records.len(),
        columns.len(),
        path.display()
    );

    Ok(TripTable::new(records, columns))
}

/// Resolve, read and filter the dataset selected by `filter`.
pub fn load_city_data(data_dir: &Path, filter: &TripFilter) -> Result<TripTable> {
    let path = find_city_file(data_dir, filter.city).ok_or_else(|| {
        BikeshareError::load(data_dir.join(filter.city.file_name()), LoadErrorKind::NotFound)
    })?;

    let table = load_trips(&path)?;
    let read = table.len();
    let table = apply_filters(table, filter);

    debug!(
        "City {}: {} trips read, {} kept (month={}, day={})",
        filter.city,
        read,
        table.len(),
        filter.month,
        filter.day
    );

    Ok(table)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
