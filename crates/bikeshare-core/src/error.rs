use std::path::PathBuf;
use thiserror::Error;

use crate::models::Column;

/// Why a city dataset could not be turned into a trip table.
#[derive(Error, Debug)]
pub enum LoadErrorKind {
    /// No file backs the requested city.
    #[error("file not found")]
    NotFound,

    /// The file exists but could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The CSV structure is broken (ragged rows, bad UTF-8, bad numbers).
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A column the loader cannot work without is absent from the header.
    #[error("required column \"{0}\" is missing")]
    MissingColumn(Column),

    /// A start timestamp did not match any recognised format.
    #[error("row {row}: invalid start time \"{value}\"")]
    Timestamp { row: usize, value: String },
}

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// Non-numeric text where a menu code was expected.
    #[error("The code has to be a numeric value (got \"{0}\")")]
    InputParse(String),

    /// A numeric menu code outside the allowed bounds. `value` is the
    /// code as typed, so codes too large for any integer type still fit.
    #[error("Invalid code {value}. Please enter a number in the given range ({min}-{max})")]
    InputRange { value: String, min: u32, max: u32 },

    /// Anything other than `yes` / `no` at a confirmation prompt.
    #[error("Invalid answer \"{0}\". Please enter yes or no")]
    InvalidAnswer(String),

    /// The city dataset could not be loaded.
    #[error("Failed to load {path}: {kind}")]
    Load {
        path: PathBuf,
        #[source]
        kind: LoadErrorKind,
    },

    /// A statistics pass needs a column the dataset does not have.
    #[error("Field \"{0}\" is not available in this dataset")]
    FieldMissing(Column),

    /// The column exists but every value in it is empty.
    #[error("Field \"{0}\" has no values")]
    FieldAllNull(Column),

    /// The filters removed every trip.
    #[error("No trips match the selected filters")]
    EmptyDataset,

    /// Console I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    /// Shorthand for building a [`BikeshareError::Load`].
    pub fn load(path: impl Into<PathBuf>, kind: impl Into<LoadErrorKind>) -> Self {
        Self::Load {
            path: path.into(),
            kind: kind.into(),
        }
    }

    /// `true` for errors the user fixes by answering the prompt again.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputParse(_) | Self::InputRange { .. } | Self::InvalidAnswer(_)
        )
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
