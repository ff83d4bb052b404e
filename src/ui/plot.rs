use eframe::egui::{self, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::output::figure::{sci_label, X_LABEL, Y_LABEL};
use crate::state::ViewerState;

const MARKER_RADIUS: f32 = 5.0;
const SELECTED_MARKER_RADIUS: f32 = 9.0;

// ---------------------------------------------------------------------------
// Corrected-series scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the interactive scatter of the corrected series.
pub fn corrected_plot(ui: &mut Ui, state: &ViewerState) {
    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The manifest lists no samples besides the blank.");
        });
        return;
    }

    Plot::new("corrected_plot")
        .legend(Legend::default())
        .x_axis_label(X_LABEL)
        .y_axis_label(Y_LABEL)
        .y_axis_formatter(|mark, _range| sci_label(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, point) in state.series.points.iter().enumerate() {
                let radius = if state.selected == Some(idx) {
                    SELECTED_MARKER_RADIUS
                } else {
                    MARKER_RADIUS
                };

                let xy: PlotPoints = vec![[point.volume_ul, point.corrected_cps]].into();
                let marker = Points::new(xy)
                    .name(format!("{} µL", point.volume_ul))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius)
                    .color(state.color_of(idx));

                plot_ui.points(marker);
            }
        });
}

// ---------------------------------------------------------------------------
// Saved figure (central panel)
// ---------------------------------------------------------------------------

/// Show the PNG artifact as written to disk.
pub fn saved_figure(ui: &mut Ui, state: &ViewerState) {
    let Some(figure) = &state.figure else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Figure not available.");
        });
        return;
    };

    egui::ScrollArea::both().show(ui, |ui: &mut Ui| {
        ui.add(
            egui::Image::from_bytes(figure.uri.clone(), figure.bytes.clone())
                .max_width(ui.available_width())
                .maintain_aspect_ratio(true),
        );
    });
}
