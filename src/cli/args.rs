//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Upload photos and their resized variants to S3.
///
/// Each PATH is a single image or a directory of images. It must lie inside
/// one of the `[[dirs]]` configured in the config file; its object keys are
/// derived from its location relative to that rule's `base_path`.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path
    #[arg(short = 'C', long, env = "S3_PHOTO_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print store requests and resize details
    #[arg(short, long)]
    pub verbose: bool,

    /// Images or directories of images to upload
    #[arg(required = true, value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,
}
