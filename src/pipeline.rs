use crate::analysis::analyse;
use crate::config::AssayConfig;
use crate::data::loader::read_manifest;
use crate::data::model::CorrectedSeries;
use crate::error::AnalysisError;
use crate::output::figure::render_figure;
use crate::output::table::write_table;

/// Run one assay analysis end to end and persist both artifacts.
///
/// Every spectrum is read and corrected before either artifact is touched,
/// so a bad input aborts the run with the previous outputs left in place.
pub fn run(config: &AssayConfig) -> Result<CorrectedSeries, AnalysisError> {
    config.validate()?;

    log::info!("Reading manifest {}", config.manifest_path.display());
    let manifest = read_manifest(&config.manifest_path)?;

    let series = analyse(&manifest, config)?;
    log::info!("Corrected {} sample(s)", series.len());

    render_figure(&series, &config.figure_path)?;
    write_table(&series, &config.table_path)?;

    Ok(series)
}
