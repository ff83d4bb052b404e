use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Input errors: manifest and spectrum files
// ---------------------------------------------------------------------------

/// Failure while reading the manifest or a spectrum file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Row numbers are 1-based file lines, header rows included.
    #[error("{}, line {line}: expected at least 2 columns, found {found}", .path.display())]
    MissingColumn {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}, line {line}: {field} '{value}' is not a valid number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("{}: manifest has no blank row", .path.display())]
    EmptyManifest { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Band lookup errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum BandError {
    #[error("wavelength {wavelength_nm} nm not found in spectrum")]
    WavelengthNotFound { wavelength_nm: i64 },

    #[error("band {start_nm}-{end_nm} nm selects no samples")]
    EmptyBand { start_nm: i64, end_nm: i64 },

    #[error("spectrum has {wavelengths} wavelengths but {count_rates} count rates")]
    LengthMismatch {
        wavelengths: usize,
        count_rates: usize,
    },
}

// ---------------------------------------------------------------------------
// Output artifacts
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// plotters errors are generic over the backend, so only the message is kept.
    #[error("{}: drawing failed: {message}", .path.display())]
    Plot { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Any failure that aborts an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("band average failed for {}", .path.display())]
    Band {
        path: PathBuf,
        #[source]
        source: BandError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{averages} band averages for {entries} manifest entries")]
    Misaligned { averages: usize, entries: usize },

    /// `index` counts manifest data rows, the blank being row 0.
    #[error("manifest row {index} ({}) has no volume", .path.display())]
    MissingVolume { index: usize, path: PathBuf },
}
