use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};

use super::model::{Descriptor, Manifest, ManifestEntry, Spectrum};
use crate::error::LoadError;

/// Header rows at the top of a manifest file.
pub const MANIFEST_HEADER_ROWS: usize = 1;
/// Header rows at the top of a spectrum export (column names + units).
pub const SPECTRUM_HEADER_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the manifest listing the blank and the sample spectra.
///
/// Layout: one header row, then `descriptor,file_path` rows. The first data
/// row is the blank and its descriptor is kept verbatim; every following
/// descriptor must be a number (the titration volume in µL).
///
/// Relative spectrum paths are resolved against the manifest's directory.
pub fn read_manifest(path: &Path) -> Result<Manifest, LoadError> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let rows = read_rows(path, MANIFEST_HEADER_ROWS)?;

    let mut entries = Vec::with_capacity(rows.len());
    for (i, (line, record)) in rows.iter().enumerate() {
        let (desc_field, file_field) = two_columns(path, *line, record)?;

        let descriptor = if i == 0 {
            Descriptor::Label(desc_field.to_string())
        } else {
            Descriptor::Volume(parse_field(path, *line, "volume", desc_field)?)
        };

        let file = PathBuf::from(file_field.trim_end_matches(['\r', '\n']));
        let file = if file.is_relative() {
            base_dir.join(file)
        } else {
            file
        };

        entries.push(ManifestEntry { descriptor, file });
    }

    if entries.is_empty() {
        return Err(LoadError::EmptyManifest {
            path: path.to_path_buf(),
        });
    }

    log::debug!(
        "Manifest {} lists {} sample(s) plus blank",
        path.display(),
        entries.len() - 1
    );
    Ok(Manifest { entries })
}

/// Read one emission spectrum: two header rows, then `wavelength,count_rate`.
pub fn read_spectrum(path: &Path) -> Result<Spectrum, LoadError> {
    let file = open(path)?;
    parse_spectrum(path, file)
}

/// Parse spectrum rows from any reader; `origin` is only used in errors.
pub fn parse_spectrum<R: Read>(origin: &Path, reader: R) -> Result<Spectrum, LoadError> {
    let rows = collect_rows(origin, reader, SPECTRUM_HEADER_ROWS)?;

    let mut wavelengths: Vec<i64> = Vec::with_capacity(rows.len());
    let mut count_rates: Vec<f64> = Vec::with_capacity(rows.len());
    for (line, record) in &rows {
        let (wave_field, count_field) = two_columns(origin, *line, record)?;
        wavelengths.push(parse_field(origin, *line, "wavelength", wave_field)?);
        count_rates.push(parse_field(origin, *line, "count rate", count_field)?);
    }

    Ok(Spectrum::new(wavelengths, count_rates))
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows(path: &Path, header_rows: usize) -> Result<Vec<(usize, StringRecord)>, LoadError> {
    let file = open(path)?;
    collect_rows(path, file, header_rows)
}

/// All records after the header, paired with their 1-based line number.
/// Header rows may have any shape, so the reader is flexible.
fn collect_rows<R: Read>(
    origin: &Path,
    reader: R,
    header_rows: usize,
) -> Result<Vec<(usize, StringRecord)>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .records()
        .enumerate()
        .skip(header_rows)
        .map(|(i, result)| -> Result<(usize, StringRecord), LoadError> {
            let record = result.map_err(|source| LoadError::Csv {
                path: origin.to_path_buf(),
                source,
            })?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(i + 1);
            Ok((line, record))
        })
        .collect()
}

fn two_columns<'r>(
    origin: &Path,
    line: usize,
    record: &'r StringRecord,
) -> Result<(&'r str, &'r str), LoadError> {
    match (record.get(0), record.get(1)) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(LoadError::MissingColumn {
            path: origin.to_path_buf(),
            line,
            found: record.len(),
        }),
    }
}

fn parse_field<T: FromStr>(
    origin: &Path,
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, LoadError> {
    value
        .trim_end_matches(['\r', '\n'])
        .parse::<T>()
        .map_err(|_| LoadError::InvalidNumber {
            path: origin.to_path_buf(),
            line,
            field,
            value: value.to_string(),
        })
}
