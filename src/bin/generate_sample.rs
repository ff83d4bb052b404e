//! Writes a synthetic titration run (manifest + emission spectra) for trying
//! out the analyser: `generate_sample [output_dir]`, default `demo_data/`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;

const WAVELENGTHS_NM: std::ops::RangeInclusive<i64> = 300..=450;

/// Titrant volumes added to the cuvette, in µL.
const VOLUMES_UL: [f64; 8] = [5.0, 10.0, 20.0, 40.0, 60.0, 80.0, 100.0, 150.0];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Emission spectrum: buffer background plus one peak at 350 nm, with
/// shot noise.
fn generate_spectrum(peak_cps: f64, background_cps: f64, noise: &mut Noise) -> Vec<(i64, f64)> {
    WAVELENGTHS_NM
        .map(|nm| {
            let signal = background_cps + gaussian(nm as f64, 350.0, 15.0, peak_cps);
            let noisy = signal + noise.normal(signal.sqrt());
            (nm, noisy.max(0.0).round())
        })
        .collect()
}

/// Deterministic SplitMix64 generator, so demo runs are reproducible.
struct Noise {
    state: u64,
}

impl Noise {
    fn seeded(seed: u64) -> Self {
        Noise { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `(0, 1]`.
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample via Box-Muller.
    fn normal(&mut self, std_dev: f64) -> f64 {
        let r = (-2.0 * self.unit().ln()).sqrt();
        let theta = std::f64::consts::TAU * self.unit();
        std_dev * r * theta.cos()
    }
}

/// Spectrum file in the instrument export layout (two header rows).
fn write_spectrum(path: &Path, rows: &[(i64, f64)]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["Wavelength", "Intensity"])?;
    writer.write_record(["nm", "CPS"])?;
    for (nm, cps) in rows {
        writer.write_record([nm.to_string(), cps.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo_data"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut noise = Noise::seeded(42);
    let background_cps = 2.0e3;
    let free_peak_cps = 4.0e5;
    // Half-saturation volume of the binding curve.
    let k_half_ul = 40.0;

    let mut manifest = vec![("buffer".to_string(), "blank.csv".to_string())];
    write_spectrum(
        &out_dir.join("blank.csv"),
        &generate_spectrum(0.0, background_cps, &mut noise),
    )?;

    for (i, &volume) in VOLUMES_UL.iter().enumerate() {
        let bound_fraction = volume / (volume + k_half_ul);
        let peak = free_peak_cps * bound_fraction;
        let name = format!("sample_{:02}.csv", i + 1);
        write_spectrum(
            &out_dir.join(&name),
            &generate_spectrum(peak, background_cps, &mut noise),
        )?;
        manifest.push((volume.to_string(), name));
    }

    let manifest_path = out_dir.join("Input Files.csv");
    let mut writer = WriterBuilder::new()
        .from_path(&manifest_path)
        .with_context(|| format!("creating {}", manifest_path.display()))?;
    writer.write_record(["Description", "File"])?;
    for (desc, file) in &manifest {
        writer.write_record([desc, file])?;
    }
    writer.flush()?;

    println!(
        "Wrote blank + {} spectra ({} wavelengths each) to {}",
        VOLUMES_UL.len(),
        WAVELENGTHS_NM.count(),
        out_dir.display()
    );
    Ok(())
}
