use std::path::Path;

use eframe::egui::{load::Bytes, Color32};

use crate::color::volume_colors;
use crate::data::model::CorrectedSeries;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Which central view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Interactive scatter of the corrected series.
    Chart,
    /// The PNG written to disk.
    Figure,
}

/// The saved figure, kept in memory for the image loader.
pub struct SavedFigure {
    pub uri: String,
    pub bytes: Bytes,
}

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    pub series: CorrectedSeries,

    /// Marker colour of each point, graded by volume.
    pub colors: Vec<Color32>,

    pub view: View,

    /// Row highlighted in the side table and on the chart.
    pub selected: Option<usize>,

    pub figure: Option<SavedFigure>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(series: CorrectedSeries) -> Self {
        let colors = volume_colors(&series);
        Self {
            series,
            colors,
            view: View::Chart,
            selected: None,
            figure: None,
            status_message: None,
        }
    }

    /// Load the PNG written by the run so it can be shown alongside the chart.
    pub fn load_figure(&mut self, path: &Path) {
        match std::fs::read(path) {
            Ok(bytes) => {
                self.figure = Some(SavedFigure {
                    uri: format!("bytes://{}", path.display()),
                    bytes: Bytes::from(bytes),
                });
            }
            Err(e) => {
                log::error!("Failed to load figure {}: {e}", path.display());
                self.status_message = Some(format!("Figure unavailable: {e}"));
            }
        }
    }

    /// Toggle the highlight on point `idx`.
    pub fn toggle_selected(&mut self, idx: usize) {
        if idx >= self.series.len() {
            return;
        }
        self.selected = if self.selected == Some(idx) {
            None
        } else {
            Some(idx)
        };
    }

    pub fn color_of(&self, idx: usize) -> Color32 {
        self.colors.get(idx).copied().unwrap_or(Color32::RED)
    }

    /// One-line description of the loaded series for the top bar.
    pub fn summary(&self) -> String {
        match self.series.bounds() {
            Some(((lo, hi), _)) => format!("{} sample(s), {lo}–{hi} µL", self.series.len()),
            None => "No samples".to_string(),
        }
    }
}
