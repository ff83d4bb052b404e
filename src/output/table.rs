use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use super::replace_atomically;
use crate::data::model::{CorrectedPoint, CorrectedSeries};
use crate::error::OutputError;

/// Column names of the results table.
pub const TABLE_HEADER: [&str; 2] = ["Volume(microliters)", "Corrected CPS"];

/// Write the corrected series as CSV, replacing any previous table.
///
/// The header row is always written, even for a blank-only run.
pub fn write_table(series: &CorrectedSeries, path: &Path) -> Result<(), OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    replace_atomically(path, ".csv", |tmp| {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer.write_record(TABLE_HEADER).map_err(csv_err)?;
        for point in &series.points {
            writer.serialize(point).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Read a results table written by [`write_table`].
pub fn read_table(path: &Path) -> Result<CorrectedSeries, OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let points = reader
        .deserialize::<CorrectedPoint>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    Ok(CorrectedSeries { points })
}
