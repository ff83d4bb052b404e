use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Spectrum – one emission spectrum file
// ---------------------------------------------------------------------------

/// A single emission spectrum, in file row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Emission wavelengths in nm, ascending.
    pub wavelengths: Vec<i64>,
    /// Count rate (CPS) at each wavelength – same length as `wavelengths`.
    pub count_rates: Vec<f64>,
}

impl Spectrum {
    pub fn new(wavelengths: Vec<i64>, count_rates: Vec<f64>) -> Self {
        debug_assert_eq!(wavelengths.len(), count_rates.len());
        Spectrum {
            wavelengths,
            count_rates,
        }
    }

    /// First position of `wavelength_nm`, if present.
    pub fn position_of(&self, wavelength_nm: i64) -> Option<usize> {
        self.wavelengths.iter().position(|&w| w == wavelength_nm)
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Descriptor – first manifest column
// ---------------------------------------------------------------------------

/// The description column of a manifest row.
///
/// The blank row's description is free text and never interpreted; every
/// sample row carries the titration volume added, in microliters.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Label(String),
    Volume(f64),
}

impl Descriptor {
    pub fn as_volume(&self) -> Option<f64> {
        match self {
            Descriptor::Volume(v) => Some(*v),
            Descriptor::Label(_) => None,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Label(s) => write!(f, "{s}"),
            Descriptor::Volume(v) => write!(f, "{v} µL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest – the list of input files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub descriptor: Descriptor,
    pub file: PathBuf,
}

/// Parsed manifest. Entry 0 is the blank/buffer, the rest are samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Number of rows, blank included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn blank(&self) -> Option<&ManifestEntry> {
        self.entries.first()
    }

    /// Sample rows, in manifest order.
    pub fn samples(&self) -> &[ManifestEntry] {
        self.entries.get(1..).unwrap_or(&[])
    }

    pub fn descriptors(&self) -> Vec<&Descriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    pub fn file_paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|e| e.file.as_path()).collect()
    }
}

// ---------------------------------------------------------------------------
// CorrectedSeries – the analysis result
// ---------------------------------------------------------------------------

/// One row of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedPoint {
    #[serde(rename = "Volume(microliters)")]
    pub volume_ul: f64,
    #[serde(rename = "Corrected CPS")]
    pub corrected_cps: f64,
}

/// Volume-corrected signal, one point per sample in manifest order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectedSeries {
    pub points: Vec<CorrectedPoint>,
}

impl CorrectedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(volume, corrected)` pairs for plotting.
    pub fn xy(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.volume_ul, p.corrected_cps))
    }

    /// Min/max of the volumes and of the corrected values, `None` if empty.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        if self.points.is_empty() {
            return None;
        }
        let fold = |(lo, hi): (f64, f64), v: f64| (lo.min(v), hi.max(v));
        let init = (f64::INFINITY, f64::NEG_INFINITY);
        let x = self.points.iter().map(|p| p.volume_ul).fold(init, fold);
        let y = self.points.iter().map(|p| p.corrected_cps).fold(init, fold);
        Some((x, y))
    }
}
