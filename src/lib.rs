//! Fluorescence titration analysis.
//!
//! Reads a manifest of emission spectra, averages each spectrum over a
//! wavelength band, subtracts the blank and corrects for dilution, then
//! writes a scatter figure and a results table.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod ui;

pub use config::AssayConfig;
pub use data::model::{CorrectedPoint, CorrectedSeries};
pub use error::AnalysisError;
pub use pipeline::run;
