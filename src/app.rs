use std::path::Path;

use eframe::egui;

use crate::data::model::CorrectedSeries;
use crate::state::{View, ViewerState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TitrationApp {
    pub state: ViewerState,
}

impl TitrationApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }
}

impl eframe::App for TitrationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: view switcher ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: results table ----
        egui::SidePanel::right("results_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart or saved figure ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Chart => plot::corrected_plot(ui, &self.state),
            View::Figure => plot::saved_figure(ui, &self.state),
        });
    }
}

/// Open the result viewer and block until the window is closed.
///
/// Artifacts must already be written; the viewer never touches them.
pub fn show(series: CorrectedSeries, figure_path: &Path) -> eframe::Result {
    let mut state = ViewerState::new(series);
    state.load_figure(figure_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fluorescence Titration",
        options,
        Box::new(move |cc| {
            // Install image loaders so the saved PNG can be decoded.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(TitrationApp::new(state)))
        }),
    )
}
