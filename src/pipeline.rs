//! Whole-file pipeline: read, transform, write.
//!
//! Every failure is raised before the output is written, so a failed run
//! never leaves a partial file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{dedupe, Outcome};

/// Errors from running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{count} parse warning(s) raised; nothing written")]
    DeniedWarnings { count: usize },
}

/// Where the generated CSS goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Overwrite the input file.
    #[default]
    InPlace,
    /// Write to another file.
    File(PathBuf),
    /// Write nothing; the caller takes [`Outcome::css`].
    Stdout,
}

/// One pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub destination: Destination,
    /// Abort before writing if the parser dropped anything.
    pub deny_warnings: bool,
}

impl Options {
    /// Overwrite `input` in place, tolerating warnings.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            destination: Destination::InPlace,
            deny_warnings: false,
        }
    }

    /// The file that will be written, if any.
    pub fn output_path(&self) -> Option<&Path> {
        match &self.destination {
            Destination::InPlace => Some(&self.input),
            Destination::File(path) => Some(path),
            Destination::Stdout => None,
        }
    }
}

/// Read the input, deduplicate it and write the result.
pub fn run(options: &Options) -> Result<Outcome, Error> {
    let source = fs::read_to_string(&options.input).map_err(|source| Error::Read {
        path: options.input.clone(),
        source,
    })?;

    let outcome = dedupe(&source);

    for warning in &outcome.warnings {
        warn!("{}: {warning}", options.input.display());
    }
    if options.deny_warnings && !outcome.warnings.is_empty() {
        return Err(Error::DeniedWarnings {
            count: outcome.warnings.len(),
        });
    }

    info!(
        "{}: removed {} duplicate declaration(s), pruned {} empty selector(s)",
        options.input.display(),
        outcome.report.removals.len(),
        outcome.report.pruned.len()
    );

    if let Some(path) = options.output_path() {
        fs::write(path, &outcome.css).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote {}", path.display());
    }

    Ok(outcome)
}
