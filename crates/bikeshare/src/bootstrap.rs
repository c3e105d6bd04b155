use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bikeshare_core::models::City;

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a user-facing level name to an [`EnvFilter`] directive.
///
/// Unknown names are passed through unchanged.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Log lines go to stderr so they never interleave with the report on
/// stdout. Falls back to `"warn"` if the level is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

// ── Data-dir discovery ─────────────────────────────────────────────────────────

/// Locate the directory holding the city CSV files.
///
/// Checks the current directory, `./data` and `~/.bikeshare/data` in that
/// order and returns the first containing at least one city file. Falls
/// back to the current directory.
pub fn discover_data_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = dirs::home_dir();
    discover_data_dir_in(&cwd, home.as_deref())
}

fn discover_data_dir_in(cwd: &Path, home: Option<&Path>) -> PathBuf {
    let mut candidates = vec![cwd.to_path_buf(), cwd.join("data")];
    if let Some(home) = home {
        candidates.push(home.join(".bikeshare").join("data"));
    }
    candidates
        .into_iter()
        .find(|dir| has_city_file(dir))
        .unwrap_or_else(|| cwd.to_path_buf())
}

fn has_city_file(dir: &Path) -> bool {
    City::ALL
        .iter()
        .any(|city| dir.join(city.file_name()).is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, city: City) {
        std::fs::create_dir_all(dir).expect("create dir");
        std::fs::write(dir.join(city.file_name()), "Start Time\n").expect("write city file");
    }

    // ── level_directive ───────────────────────────────────────────────────────

    #[test]
    fn test_level_directive_mapping() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("CRITICAL"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("TRACE"), "trace");
    }

    // ── discover_data_dir ─────────────────────────────────────────────────────

    #[test]
    fn test_discover_prefers_cwd() {
        let cwd = TempDir::new().expect("tempdir");
        touch(cwd.path(), City::Chicago);
        touch(&cwd.path().join("data"), City::Washington);

        assert_eq!(discover_data_dir_in(cwd.path(), None), cwd.path());
    }

    #[test]
    fn test_discover_data_subdir() {
        let cwd = TempDir::new().expect("tempdir");
        let data = cwd.path().join("data");
        touch(&data, City::NewYorkCity);

        assert_eq!(discover_data_dir_in(cwd.path(), None), data);
    }

    #[test]
    fn test_discover_home_dir() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        let data = home.path().join(".bikeshare").join("data");
        touch(&data, City::Chicago);

        assert_eq!(discover_data_dir_in(cwd.path(), Some(home.path())), data);
    }

    #[test]
    fn test_discover_falls_back_to_cwd() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(cwd.path().join("data")).expect("create data dir");

        assert_eq!(
            discover_data_dir_in(cwd.path(), Some(home.path())),
            cwd.path()
        );
    }
}
