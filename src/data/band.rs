use super::model::Spectrum;
use crate::error::BandError;

/// Inclusive emission window, in nm, over which count rates are averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandWindow {
    pub start_nm: i64,
    pub end_nm: i64,
}

impl Default for BandWindow {
    fn default() -> Self {
        BandWindow {
            start_nm: 340,
            end_nm: 360,
        }
    }
}

/// Mean count rate between the first occurrences of the window endpoints.
///
/// Both endpoints must appear verbatim in the spectrum. The slice is taken
/// by position, so the spectrum is expected to be sorted by wavelength.
pub fn band_average(spectrum: &Spectrum, window: BandWindow) -> Result<f64, BandError> {
    if spectrum.count_rates.len() != spectrum.wavelengths.len() {
        return Err(BandError::LengthMismatch {
            wavelengths: spectrum.wavelengths.len(),
            count_rates: spectrum.count_rates.len(),
        });
    }
    let (start, end) = locate(spectrum, window)?;

    if end < start {
        return Err(BandError::EmptyBand {
            start_nm: window.start_nm,
            end_nm: window.end_nm,
        });
    }

    let band = &spectrum.count_rates[start..=end];
    Ok(band.iter().sum::<f64>() / band.len() as f64)
}

/// Positions of the window endpoints, checked before any slicing.
fn locate(spectrum: &Spectrum, window: BandWindow) -> Result<(usize, usize), BandError> {
    let find = |wavelength_nm| {
        spectrum
            .position_of(wavelength_nm)
            .ok_or(BandError::WavelengthNotFound { wavelength_nm })
    };
    Ok((find(window.start_nm)?, find(window.end_nm)?))
}
