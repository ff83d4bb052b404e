use crate::config::AssayConfig;
use crate::data::band::{band_average, BandWindow};
use crate::data::loader::read_spectrum;
use crate::data::model::{CorrectedPoint, CorrectedSeries, Manifest};
use crate::error::AnalysisError;

/// Band-average every spectrum in the manifest, blank first.
pub fn band_averages(
    manifest: &Manifest,
    window: BandWindow,
) -> Result<Vec<f64>, AnalysisError> {
    manifest
        .entries
        .iter()
        .map(|entry| -> Result<f64, AnalysisError> {
            let spectrum = read_spectrum(&entry.file)?;
            let average =
                band_average(&spectrum, window).map_err(|source| AnalysisError::Band {
                    path: entry.file.clone(),
                    source,
                })?;
            log::debug!(
                "{} ({}): {} points, mean {:.4e} CPS over {}-{} nm",
                entry.file.display(),
                entry.descriptor,
                spectrum.len(),
                average,
                window.start_nm,
                window.end_nm
            );
            Ok(average)
        })
        .collect()
}

/// Baseline-subtracted, dilution-corrected signal of one sample.
pub fn volume_correct(
    sample_avg: f64,
    baseline: f64,
    volume_ul: f64,
    total_volume_ul: f64,
) -> f64 {
    (sample_avg - baseline) * volume_ul / total_volume_ul
}

/// Turn per-entry band averages into the corrected series.
///
/// `averages` must be index-aligned with `manifest.entries`; entry 0 is the
/// blank and provides the baseline. Every later entry must carry a volume.
pub fn correct(
    manifest: &Manifest,
    averages: &[f64],
    total_volume_ul: f64,
) -> Result<CorrectedSeries, AnalysisError> {
    if averages.len() != manifest.len() || averages.is_empty() {
        return Err(AnalysisError::Misaligned {
            averages: averages.len(),
            entries: manifest.len(),
        });
    }
    let baseline = averages[0];

    let points = manifest
        .samples()
        .iter()
        .zip(&averages[1..])
        .enumerate()
        .map(|(i, (entry, &avg))| -> Result<CorrectedPoint, AnalysisError> {
            let volume_ul = entry.descriptor.as_volume().ok_or_else(|| {
                AnalysisError::MissingVolume {
                    index: i + 1,
                    path: entry.file.clone(),
                }
            })?;
            let corrected_cps = volume_correct(avg, baseline, volume_ul, total_volume_ul);
            if corrected_cps < 0.0 {
                log::warn!(
                    "{}: signal below blank baseline (corrected {:.4e} CPS)",
                    entry.file.display(),
                    corrected_cps
                );
            }
            Ok(CorrectedPoint {
                volume_ul,
                corrected_cps,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorrectedSeries { points })
}

/// Read all spectra listed in `manifest` and compute the corrected series.
pub fn analyse(
    manifest: &Manifest,
    config: &AssayConfig,
) -> Result<CorrectedSeries, AnalysisError> {
    let averages = band_averages(manifest, config.band())?;
    log::info!(
        "Blank baseline: {:.4e} CPS ({} sample(s))",
        averages.first().copied().unwrap_or_default(),
        manifest.samples().len()
    );
    correct(manifest, &averages, config.total_volume_ul)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Descriptor, ManifestEntry};
    use std::path::PathBuf;

    fn manifest(volumes: &[f64]) -> Manifest {
        let mut entries = vec![ManifestEntry {
            descriptor: Descriptor::Label("blank".into()),
            file: PathBuf::from("blank.csv"),
        }];
        entries.extend(volumes.iter().enumerate().map(|(i, &v)| ManifestEntry {
            descriptor: Descriptor::Volume(v),
            file: PathBuf::from(format!("s{}.csv", i + 1)),
        }));
        Manifest { entries }
    }

    #[test]
    fn blank_and_one_sample() {
        let series = correct(&manifest(&[100.0]), &[2.0, 5.0], 900.0).unwrap();
        assert_eq!(series.len(), 1);
        let p = series.points[0];
        assert_eq!(p.volume_ul, 100.0);
        assert!((p.corrected_cps - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn correction_is_linear_in_volume() {
        let single = volume_correct(1250.0, 250.0, 40.0, 900.0);
        let double = volume_correct(1250.0, 250.0, 80.0, 900.0);
        assert!((double - 2.0 * single).abs() < 1e-9);
    }

    #[test]
    fn preserves_manifest_order() {
        let averages = [1.0, 2.0, 3.0, 4.0];
        let series = correct(&manifest(&[30.0, 10.0, 20.0]), &averages, 900.0).unwrap();
        let volumes: Vec<f64> = series.points.iter().map(|p| p.volume_ul).collect();
        assert_eq!(volumes, vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn sample_at_baseline_corrects_to_zero() {
        let series = correct(&manifest(&[50.0]), &[7.0, 7.0], 900.0).unwrap();
        assert_eq!(series.points[0].corrected_cps, 0.0);
    }

    #[test]
    fn blank_only_yields_empty_series() {
        let series = correct(&manifest(&[]), &[3.0], 900.0).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn misaligned_averages_are_rejected() {
        let err = correct(&manifest(&[10.0, 20.0]), &[1.0, 2.0], 900.0).unwrap_err();
        assert!(matches!(err, AnalysisError::Misaligned { averages: 2, entries: 3 }));
    }

    #[test]
    fn labelled_sample_is_an_error() {
        let mut m = manifest(&[100.0]);
        m.entries.insert(
            1,
            ManifestEntry {
                descriptor: Descriptor::Label("oops".into()),
                file: PathBuf::from("oops.csv"),
            },
        );

        let err = correct(&m, &[2.0, 5.0, 8.0], 900.0).unwrap_err();
        match err {
            AnalysisError::MissingVolume { index, path } => {
                assert_eq!(index, 1);
                assert_eq!(path, PathBuf::from("oops.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
