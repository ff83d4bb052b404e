use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::output::figure::sci_label;
use crate::state::{View, ViewerState};

// ---------------------------------------------------------------------------
// Right side panel – results table
// ---------------------------------------------------------------------------

/// Render the table of corrected points; clicking a row highlights it.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Results");
    ui.separator();

    if state.series.is_empty() {
        ui.label("No samples.");
        return;
    }

    let mut clicked = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("results_table")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Volume (µL)");
                    ui.strong("Corrected CPS");
                    ui.end_row();

                    for (idx, point) in state.series.points.iter().enumerate() {
                        let text = RichText::new(format!("{}", point.volume_ul))
                            .color(state.color_of(idx));
                        if ui
                            .selectable_label(state.selected == Some(idx), text)
                            .clicked()
                        {
                            clicked = Some(idx);
                        }
                        ui.monospace(sci_label(point.corrected_cps));
                        ui.end_row();
                    }
                });
        });

    if let Some(idx) = clicked {
        state.toggle_selected(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the view switcher and run summary.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui
            .selectable_label(state.view == View::Chart, "Chart")
            .clicked()
        {
            state.view = View::Chart;
        }
        if ui
            .selectable_label(state.view == View::Figure, "Saved figure")
            .clicked()
        {
            state.view = View::Figure;
        }

        ui.separator();
        ui.label(state.summary());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
