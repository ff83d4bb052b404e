use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};

use fluoro_titration::config::{AssayConfig, CONFIG_FILE};
use fluoro_titration::{app, pipeline};

fn run() -> Result<()> {
    let config = AssayConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("loading assay configuration")?;

    let series = pipeline::run(&config).context("analysing titration")?;

    if config.show_plot {
        app::show(series, &config.figure_path).map_err(|e| anyhow!("viewer failed: {e}"))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
