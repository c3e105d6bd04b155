//! Data-source access for the analysis cycles.
//!
//! [`DataManager`] knows where the city files live and hands out a freshly
//! loaded, filtered [`TripTable`] for every cycle. Nothing is cached: each
//! cycle owns its table and drops it when it ends.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bikeshare_core::error::Result;
use bikeshare_core::models::{City, TripFilter, TripTable};
use bikeshare_data::reader::{available_cities, load_city_data};

/// Entry point for loading city datasets from one data directory.
///
/// # Example
/// ```no_run
/// use bikeshare_core::models::{City, TripFilter};
/// use bikeshare_runtime::data_manager::DataManager;
///
/// let mgr = DataManager::new("./data");
/// if let Ok((table, _)) = mgr.load(&TripFilter::all(City::Chicago)) {
///     println!("{} trips", table.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataManager {
    data_dir: PathBuf,
}

impl DataManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Cities with a data file under the data directory.
    pub fn available_cities(&self) -> Vec<City> {
        available_cities(&self.data_dir)
    }

    /// Load and filter the dataset selected by `filter`, returning it along
    /// with the time spent loading.
    pub fn load(&self, filter: &TripFilter) -> Result<(TripTable, Duration)> {
        let start = Instant::now();
        match load_city_data(&self.data_dir, filter) {
            Ok(table) => {
                let elapsed = start.elapsed();
                tracing::info!(
                    city = %filter.city,
                    trips = table.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "dataset loaded"
                );
                Ok((table, elapsed))
            }
            Err(e) => {
                tracing::warn!(city = %filter.city, error = %e, "dataset load failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::error::BikeshareError;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_city(dir: &Path, city: City, rows: &[&str]) {
        let mut file = std::fs::File::create(dir.join(city.file_name())).unwrap();
        writeln!(
            file,
            "Start Time,End Time,Trip Duration,Start Station,End Station,User Type"
        )
        .unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
    }

    #[test]
    fn test_load_returns_table() {
        let dir = TempDir::new().unwrap();
        write_city(
            dir.path(),
            City::Washington,
            &["2017-01-02 10:00:00,2017-01-02 10:05:00,300,A,B,Subscriber"],
        );

        let mgr = DataManager::new(dir.path());
        let (table, _elapsed) = mgr.load(&TripFilter::all(City::Washington)).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_city_is_load_error() {
        let dir = TempDir::new().unwrap();
        let mgr = DataManager::new(dir.path());
        let err = mgr.load(&TripFilter::all(City::Chicago)).unwrap_err();
        assert!(matches!(err, BikeshareError::Load { .. }));
    }

    #[test]
    fn test_available_cities() {
        let dir = TempDir::new().unwrap();
        write_city(dir.path(), City::NewYorkCity, &[]);
        let mgr = DataManager::new(dir.path());
        assert_eq!(mgr.available_cities(), vec![City::NewYorkCity]);
        assert_eq!(mgr.data_dir(), dir.path());
    }
}
