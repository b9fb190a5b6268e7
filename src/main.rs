//! s3-photo - upload photos and their resized variants to S3.

mod cli;
mod config;
mod image;
mod key;
mod logger;
mod pipeline;
mod router;
mod store;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, run_batch};
use config::PhotoConfig;
use store::S3Store;

use crate::image::ImageResizer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = match PhotoConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            log!("error"; "{:#}", e);
            std::process::exit(1);
        }
    };
    debug!(
        "config";
        "loaded {} ({} rules, {} sizes)",
        config.config_path.display(),
        config.dirs.len(),
        config.sizes.len()
    );

    let store = match S3Store::from_config(&config.s3) {
        Ok(store) => store,
        Err(e) => {
            log!("error"; "{}", logger::error_chain(&e));
            std::process::exit(1);
        }
    };
    let resizer = ImageResizer::new(config.format);

    // Uploads are strictly sequential; a single thread is all we need
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(run_batch(&config, &store, &resizer, &cli.paths));

    for input in report.skipped_inputs() {
        log!("done"; "skipped {}", input.display());
    }
    log!("done"; "{}", report.summary());
    Ok(())
}
