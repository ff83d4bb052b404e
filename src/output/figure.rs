use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use super::replace_atomically;
use crate::data::model::CorrectedSeries;
use crate::error::OutputError;

// Figure dimensions in pixels.
pub const FIGURE_WIDTH: u32 = 1024;
pub const FIGURE_HEIGHT: u32 = 768;

pub const X_LABEL: &str = "Total Volume (microliters)";
pub const Y_LABEL: &str = "Corrected Counts/Second";

const MARKER_RADIUS: i32 = 5;
const FONT_SIZE_AXIS_LABEL: i32 = 20;

/// Axis range with 15% padding, or a fixed padding for degenerate ranges.
pub fn padded_range(min_val: f64, max_val: f64) -> Range<f64> {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let span = (max - min).abs();
    let padding = if span < 1e-12 {
        if min.abs() > 0.0 {
            min.abs() * 0.15
        } else {
            0.5
        }
    } else {
        span * 0.15
    };
    (min - padding)..(max + padding)
}

/// Tick label in scientific notation, e.g. `3.33e-4`.
pub fn sci_label(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value:.2e}")
    }
}

/// Render the corrected series as a scatter plot PNG at `path`.
///
/// The previous image is replaced only once the new one is fully encoded.
/// When no font can be loaded for the axis text, the figure is drawn
/// without text instead of failing the run.
pub fn render_figure(series: &CorrectedSeries, path: &Path) -> Result<(), OutputError> {
    replace_atomically(path, ".png", |tmp| {
        let drawn = draw_scatter(series, tmp.path(), Annotation::Labelled).or_else(|e| {
            log::warn!(
                "Axis text unavailable ({e}); drawing {} without labels",
                path.display()
            );
            draw_scatter(series, tmp.path(), Annotation::Bare)
        });
        drawn.map_err(|e| OutputError::Plot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    })
}

/// Whether the figure carries axis text. `Bare` needs no font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Annotation {
    Labelled,
    Bare,
}

fn axis_ranges(series: &CorrectedSeries) -> (Range<f64>, Range<f64>) {
    match series.bounds() {
        Some(((x_min, x_max), (y_min, y_max))) => {
            (padded_range(x_min, x_max), padded_range(y_min, y_max))
        }
        None => (0.0..1.0, 0.0..1.0),
    }
}

fn draw_scatter(
    series: &CorrectedSeries,
    target: &Path,
    annotation: Annotation,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(target, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(series);
    let (x0, y0) = (x_range.start, y_range.start);
    let (x1, y1) = (x_range.end, y_range.end);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if annotation == Annotation::Labelled {
        builder.x_label_area_size(60).y_label_area_size(90);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    match annotation {
        Annotation::Labelled => {
            chart
                .configure_mesh()
                .x_desc(X_LABEL)
                .y_desc(Y_LABEL)
                .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
                .y_label_formatter(&|y| sci_label(*y))
                .draw()?;
        }
        Annotation::Bare => {
            // Plain axis lines along the lower and left edges.
            chart.draw_series([
                PathElement::new(vec![(x0, y0), (x1, y0)], BLACK),
                PathElement::new(vec![(x0, y0), (x0, y1)], BLACK),
            ])?;
        }
    }

    chart.draw_series(
        series
            .xy()
            .map(|(x, y)| Circle::new((x, y), MARKER_RADIUS, RED.filled())),
    )?;

    root.present()?;
    Ok(())
}
