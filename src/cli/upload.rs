//! Batch upload orchestration.
//!
//! Paths are handled in the order given, one file at a time:
//!
//! ```text
//! path ─route─▶ file       ─▶ pipeline
//!            └▶ directory  ─list─▶ pipeline, pipeline, ...
//! ```
//!
//! Routing and per-file errors are logged and the batch moves on; only
//! configuration problems (handled in `main`) stop the process.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::{
    config::PhotoConfig,
    debug,
    image::Resizer,
    key::KeyPrefix,
    log,
    logger::error_chain,
    pipeline::{FileReport, Pipeline},
    router::{self, InputKind, RouteError, RoutedInput},
    store::ObjectStore,
    utils::plural_count,
};

/// Outcome of one CLI path.
#[derive(Debug)]
pub struct InputReport {
    pub input: PathBuf,
    /// Per-file reports, or why the path was skipped.
    pub outcome: Result<Vec<FileReport>, RouteError>,
}

/// Outcome of the whole run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub inputs: Vec<InputReport>,
}

impl BatchReport {
    pub fn files(&self) -> impl Iterator<Item = &FileReport> {
        self.inputs
            .iter()
            .filter_map(|i| i.outcome.as_ref().ok())
            .flatten()
    }

    pub fn succeeded(&self) -> usize {
        self.files().filter(|f| f.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.files().filter(|f| !f.is_ok()).count()
    }

    /// Paths that were never processed (no rule, missing, unreadable).
    pub fn skipped(&self) -> usize {
        self.inputs.iter().filter(|i| i.outcome.is_err()).count()
    }

    /// CLI paths that were skipped, in input order.
    pub fn skipped_inputs(&self) -> impl Iterator<Item = &Path> {
        self.inputs
            .iter()
            .filter(|i| i.outcome.is_err())
            .map(|i| i.input.as_path())
    }

    pub fn summary(&self) -> String {
        let mut line = format!("{} uploaded", plural_count(self.succeeded(), "file"));
        if self.failed() > 0 {
            line.push_str(&format!(", {} failed", self.failed()));
        }
        if self.skipped() > 0 {
            line.push_str(&format!(", {} skipped", plural_count(self.skipped(), "path")));
        }
        line
    }
}

/// Route and upload every path in `paths`.
pub async fn run_batch(
    config: &PhotoConfig,
    store: &dyn ObjectStore,
    resizer: &dyn Resizer,
    paths: &[PathBuf],
) -> BatchReport {
    let pipeline = Pipeline::new(config, store, resizer);
    let mut report = BatchReport::default();

    for input in paths {
        let outcome = process_input(config, &pipeline, input).await;
        if let Err(err) = &outcome {
            log!("error"; "{}", error_chain(err));
        }
        report.inputs.push(InputReport {
            input: input.clone(),
            outcome,
        });
    }

    report
}

async fn process_input(
    config: &PhotoConfig,
    pipeline: &Pipeline<'_>,
    input: &Path,
) -> Result<Vec<FileReport>, RouteError> {
    let routed = router::route(input, &config.dirs).await?;
    debug!(
        "route";
        "{} -> dirs[{}] ({})",
        routed.path.display(),
        routed.rule_index,
        routed.rule.base_path.display()
    );

    match routed.kind {
        InputKind::File => {
            log!("file"; "processing file {}", routed.path.display());
            let report = process_one(pipeline, &routed, &routed.path).await;
            Ok(vec![report])
        }
        InputKind::Directory => process_directory(config, pipeline, &routed).await,
    }
}

async fn process_directory(
    config: &PhotoConfig,
    pipeline: &Pipeline<'_>,
    routed: &RoutedInput<'_>,
) -> Result<Vec<FileReport>, RouteError> {
    let files = router::list_images(&routed.path, &config.extension).await?;
    log!(
        "dir";
        "processing directory {} ({})",
        routed.path.display(),
        plural_count(files.len(), "image")
    );

    let total = files.len();
    let mut reports = Vec::with_capacity(total);
    for (i, file) in files.iter().enumerate() {
        let name = file.file_name().unwrap_or_default().to_string_lossy();
        log!("file"; "processing file {} ({}/{})", name, i + 1, total);
        reports.push(process_one(pipeline, routed, file).await);
    }

    let base_key = KeyPrefix::for_dir(&routed.path, routed.rule, routed.secret());
    log!(
        "dir";
        "finished directory {}, written to S3 key {}",
        routed.path.display(),
        base_key
    );
    Ok(reports)
}

async fn process_one(pipeline: &Pipeline<'_>, routed: &RoutedInput<'_>, file: &Path) -> FileReport {
    let report = pipeline
        .process_file(file, routed.rule, routed.secret())
        .await;
    let name = report.file.file_name().unwrap_or_default().to_string_lossy();
    if report.is_ok() {
        log!("file"; "{} written to S3 key {}", name, report.base_key);
    } else {
        log!("file"; "{} incomplete under S3 key {}", name, report.base_key);
    }
    report
}
