use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Rows shown per raw-data page unless overridden.
pub const DEFAULT_PAGE_SIZE: u16 = 5;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    /// (auto-detected if not specified)
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Rows per raw data page (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, so
    /// tests can drive the parser.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::apply_overrides(Self::parse_from(args))
    }

    /// Fallible variant of [`Settings::load_from_args`].
    pub fn try_load_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map(Self::apply_overrides)
    }

    /// `--debug` overrides the log level.
    fn apply_overrides(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Page size as a `usize` for slicing.
    pub fn page_size(&self) -> usize {
        usize::from(self.page_size)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
