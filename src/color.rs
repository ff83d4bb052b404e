use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CorrectedSeries;

// Hue sweep used for the titration progression: blue at the smallest
// volume, red at the largest.
const HUE_LOW_VOLUME: f32 = 240.0;
const HUE_HIGH_VOLUME: f32 = 0.0;

fn hsl_to_color32(hue: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, 0.75, 0.5).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Colour for a value at position `t` in `[0, 1]` along the volume axis.
pub fn ramp_color(t: f64) -> Color32 {
    let t = if t.is_finite() {
        t.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    hsl_to_color32(HUE_LOW_VOLUME + (HUE_HIGH_VOLUME - HUE_LOW_VOLUME) * t)
}

/// One colour per point of `series`, graded by titration volume.
pub fn volume_colors(series: &CorrectedSeries) -> Vec<Color32> {
    let Some(((lo, hi), _)) = series.bounds() else {
        return Vec::new();
    };
    let span = hi - lo;
    series
        .points
        .iter()
        .map(|p| {
            let t = if span > 0.0 {
                (p.volume_ul - lo) / span
            } else {
                0.0
            };
            ramp_color(t)
        })
        .collect()
}
