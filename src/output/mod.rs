//! Output artifacts: the results table and the scatter figure.
//!
//! Both are written to a temporary file next to the destination and then
//! renamed over it, so the destination always holds either the previous
//! run's artifact or the complete new one.

pub mod figure;
pub mod table;

use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::OutputError;

/// Write `dest` through a sibling temporary file, then rename it into place.
///
/// `write` receives the open temporary file. If it fails, the temporary file
/// is removed and `dest` is left untouched.
pub fn replace_atomically<F>(dest: &Path, suffix: &str, write: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), OutputError>,
{
    let io_err = |source| OutputError::Io {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".partial-")
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(io_err)?;

    write(&mut tmp)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(dest).map_err(|e| io_err(e.error))?;

    log::info!("Wrote {}", dest.display());
    Ok(())
}
