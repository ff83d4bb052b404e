// tests/pipeline_tests.rs
//
// End-to-end checks on real files in a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use fluoro_titration::analysis::analyse;
use fluoro_titration::data::loader::read_manifest;
use fluoro_titration::error::{AnalysisError, BandError};
use fluoro_titration::output::table::{read_table, write_table};
use fluoro_titration::AssayConfig;
use tempfile::TempDir;

/// Write a spectrum whose 340-360 nm band averages to `band_avg`.
/// Values outside the band are large so a wrong window is obvious.
fn write_spectrum(dir: &Path, name: &str, band_avg: f64, last_nm: i64) {
    let mut text = String::from("Wavelength,Intensity\nnm,CPS\n");
    for nm in 320..=last_nm {
        let cps = if (340..=360).contains(&nm) {
            // Symmetric offsets around the mean cancel out.
            band_avg + (nm - 350) as f64
        } else {
            1.0e6
        };
        text.push_str(&format!("{nm},{cps}\n"));
    }
    fs::write(dir.join(name), text).unwrap();
}

fn config_in(dir: &Path) -> AssayConfig {
    AssayConfig {
        manifest_path: dir.join("Input Files.csv"),
        figure_path: dir.join("outputFigure1.png"),
        table_path: dir.join("outputDoc.csv"),
        show_plot: false,
        ..AssayConfig::default()
    }
}

fn write_manifest(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let mut text = String::from("Description,File\n");
    for (desc, file) in rows {
        text.push_str(&format!("{desc},{file}\n"));
    }
    let path = dir.join("Input Files.csv");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn blank_and_single_sample_scenario() {
    let dir = TempDir::new().unwrap();
    write_spectrum(dir.path(), "blank.csv", 2.0, 400);
    write_spectrum(dir.path(), "s1.csv", 5.0, 400);
    let manifest_path = write_manifest(dir.path(), &[("blank", "blank.csv"), ("100.0", "s1.csv")]);
    let config = config_in(dir.path());

    let manifest = read_manifest(&manifest_path).unwrap();
    let series = analyse(&manifest, &config).unwrap();
    write_table(&series, &config.table_path).unwrap();

    let table = read_table(&config.table_path).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.points[0].volume_ul, 100.0);
    assert!((table.points[0].corrected_cps - 0.333_333_333_333).abs() < 1e-9);
}

#[test]
fn missing_band_edge_aborts_before_any_artifact() {
    let dir = TempDir::new().unwrap();
    write_spectrum(dir.path(), "blank.csv", 2.0, 400);
    // Stops at 359 nm, so the 360 nm band edge is absent.
    write_spectrum(dir.path(), "s1.csv", 5.0, 359);
    write_manifest(dir.path(), &[("blank", "blank.csv"), ("100", "s1.csv")]);
    let config = config_in(dir.path());

    let err = fluoro_titration::run(&config).unwrap_err();
    match err {
        AnalysisError::Band { path, source } => {
            assert!(path.ends_with("s1.csv"));
            assert_eq!(source, BandError::WavelengthNotFound { wavelength_nm: 360 });
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.figure_path.exists());
    assert!(!config.table_path.exists());
}

#[test]
fn failed_run_keeps_previous_table() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.table_path, "Volume(microliters),Corrected CPS\n1.0,2.0\n").unwrap();
    write_manifest(dir.path(), &[("blank", "blank.csv"), ("100", "missing.csv")]);
    write_spectrum(dir.path(), "blank.csv", 2.0, 400);

    let err = fluoro_titration::run(&config).unwrap_err();
    assert!(matches!(err, AnalysisError::Load(_)));
    assert_eq!(read_table(&config.table_path).unwrap().len(), 1);
}

#[test]
fn rerun_fully_replaces_table() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    for (name, avg) in [("blank.csv", 1.0), ("a.csv", 10.0), ("b.csv", 20.0), ("c.csv", 30.0)] {
        write_spectrum(dir.path(), name, avg, 380);
    }

    let first = write_manifest(
        dir.path(),
        &[("blank", "blank.csv"), ("10", "a.csv"), ("20", "b.csv"), ("30", "c.csv")],
    );
    let series = analyse(&read_manifest(&first).unwrap(), &config).unwrap();
    write_table(&series, &config.table_path).unwrap();
    assert_eq!(read_table(&config.table_path).unwrap().len(), 3);

    let second = write_manifest(dir.path(), &[("blank", "blank.csv"), ("45", "b.csv")]);
    let series = analyse(&read_manifest(&second).unwrap(), &config).unwrap();
    write_table(&series, &config.table_path).unwrap();

    let table = read_table(&config.table_path).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.points[0].volume_ul, 45.0);
    assert!((table.points[0].corrected_cps - 19.0 * 45.0 / 900.0).abs() < 1e-9);
}

#[test]
fn custom_band_and_total_volume() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.band_start_nm = 330;
    config.band_end_nm = 330;
    config.total_volume_ul = 100.0;

    // 330 nm sits outside the default band, where every value is 1e6.
    write_spectrum(dir.path(), "blank.csv", 2.0, 400);
    fs::write(dir.path().join("s1.csv"), "h\nh\n330,1000050.0\n340,0\n").unwrap();
    let manifest_path = write_manifest(dir.path(), &[("blank", "blank.csv"), ("10", "s1.csv")]);

    let series = analyse(&read_manifest(&manifest_path).unwrap(), &config).unwrap();
    assert!((series.points[0].corrected_cps - 5.0).abs() < 1e-9);
}

#[test]
fn invalid_config_is_rejected_before_reading_input() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.total_volume_ul = -1.0;
    assert!(matches!(
        fluoro_titration::run(&config).unwrap_err(),
        AnalysisError::Config(_)
    ));
}

#[test]
fn full_run_writes_both_artifacts() {
    let dir = TempDir::new().unwrap();
    write_spectrum(dir.path(), "blank.csv", 2.0, 400);
    write_spectrum(dir.path(), "s1.csv", 5.0, 400);
    write_spectrum(dir.path(), "s2.csv", 8.0, 400);
    write_manifest(
        dir.path(),
        &[("blank", "blank.csv"), ("100", "s1.csv"), ("200", "s2.csv")],
    );
    let config = config_in(dir.path());

    let series = fluoro_titration::run(&config).unwrap();
    assert_eq!(series.len(), 2);
    let png = fs::read(&config.figure_path).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    assert_eq!(read_table(&config.table_path).unwrap(), series);
}
