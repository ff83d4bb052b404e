use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::band::BandWindow;
use crate::error::ConfigError;

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "assay.json";

// ---------------------------------------------------------------------------
// Assay configuration
// ---------------------------------------------------------------------------

/// Everything a run needs besides the input data.
///
/// Every field has a default matching the standard plate-reader setup, so an
/// empty JSON object (or no file at all) is a valid configuration:
///
/// ```json
/// { "band_start_nm": 340, "band_end_nm": 360, "total_volume_ul": 900.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssayConfig {
    /// Manifest listing blank and sample spectra.
    pub manifest_path: PathBuf,
    /// Scatter plot output (PNG).
    pub figure_path: PathBuf,
    /// Results table output (CSV).
    pub table_path: PathBuf,
    pub band_start_nm: i64,
    pub band_end_nm: i64,
    /// Total assay volume in µL used for the dilution correction.
    pub total_volume_ul: f64,
    /// Open the interactive viewer once the artifacts are written.
    pub show_plot: bool,
}

impl Default for AssayConfig {
    fn default() -> Self {
        let band = BandWindow::default();
        Self {
            manifest_path: PathBuf::from("Input Files.csv"),
            figure_path: PathBuf::from("outputFigure1.png"),
            table_path: PathBuf::from("outputDoc.csv"),
            band_start_nm: band.start_nm,
            band_end_nm: band.end_nm,
            total_volume_ul: 900.0,
            show_plot: true,
        }
    }
}

impl AssayConfig {
    /// Read a JSON config file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AssayConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AssayConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::info!("Using configuration from {}", path.display());
            Self::load(path)
        } else {
            log::debug!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_start_nm > self.band_end_nm {
            return Err(ConfigError::Invalid(format!(
                "band start {} nm is above band end {} nm",
                self.band_start_nm, self.band_end_nm
            )));
        }
        if !self.total_volume_ul.is_finite() || self.total_volume_ul <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "total volume must be a positive number of microliters, got {}",
                self.total_volume_ul
            )));
        }
        Ok(())
    }

    pub fn band(&self) -> BandWindow {
        BandWindow {
            start_nm: self.band_start_nm,
            end_nm: self.band_end_nm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_standard_assay() {
        let cfg = AssayConfig::default();
        assert_eq!(cfg.manifest_path, PathBuf::from("Input Files.csv"));
        assert_eq!(cfg.figure_path, PathBuf::from("outputFigure1.png"));
        assert_eq!(cfg.table_path, PathBuf::from("outputDoc.csv"));
        assert_eq!(
            cfg.band(),
            BandWindow {
                start_nm: 340,
                end_nm: 360,
            }
        );
        assert_eq!(cfg.total_volume_ul, 900.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "band_start_nm": 400, "band_end_nm": 420, "show_plot": false }"#)
            .unwrap();

        let cfg = AssayConfig::load(&path).unwrap();
        assert_eq!(
            cfg.band(),
            BandWindow {
                start_nm: 400,
                end_nm: 420,
            }
        );
        assert!(!cfg.show_plot);
        assert_eq!(cfg.total_volume_ul, 900.0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "band_start": 340 }"#).unwrap();
        assert!(matches!(
            AssayConfig::load(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn inverted_band_is_invalid() {
        let cfg = AssayConfig {
            band_start_nm: 360,
            band_end_nm: 340,
            ..AssayConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_total_volume_is_invalid() {
        let cfg = AssayConfig {
            total_volume_ul: 0.0,
            ..AssayConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AssayConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, AssayConfig::default());
    }
}
