//! Command-line interface and run orchestration.
//!
//! This module handles:
//! - Argument parsing
//! - Target path resolution (explicit argument or `<home>/Downloads`)
//! - The sequential classify-and-move loop over the target directory
//! - The closing summary report

use chrono::{DateTime, Local};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_category::{CategoryMap, Classifier};
use crate::file_organizer::{OrganizeError, OrganizeResult, SafeMover, prepare_directories};
use crate::output::OutputFormatter;

/// Organize a downloads folder into category subdirectories.
///
/// Files are routed by extension into Documents, Images, Audio, Video,
/// Archives, Code or Executables; files not modified for more than 30 days
/// go to "Old Files"; everything else goes to "Others".
#[derive(Debug, Parser)]
#[command(name = "downsort", version)]
pub struct Cli {
    /// Directory to organize. Defaults to the user's Downloads folder.
    pub path: Option<PathBuf>,
}

/// Knobs for a single organization run.
///
/// The defaults are what the binary uses; tests inject their own reference
/// time and exclusion names to exercise age handling deterministically.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    /// Category table to classify against.
    pub map: CategoryMap,
    /// Reference timestamp for age comparisons, captured once per run.
    pub reference_time: DateTime<Local>,
    /// Entry names that are never moved.
    pub excluded_names: HashSet<String>,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            map: CategoryMap::default(),
            reference_time: Local::now(),
            excluded_names: self_artifact_name().into_iter().collect(),
        }
    }
}

/// Per-run counters reported in the closing summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Files relocated into a category or catch-all directory.
    pub moved: usize,
    /// Entries left in place (subdirectories, excluded names, unreadable
    /// metadata).
    pub skipped: usize,
}

/// Returns the running executable's file name, if it can be determined.
///
/// Used to seed the exclusion list so a binary colocated in the scanned
/// directory is never moved.
fn self_artifact_name() -> Option<String> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
}

/// Returns the directory to operate on.
///
/// An explicit path is taken as-is, with no existence check; validation
/// happens when directories are prepared. Without one, the default is
/// `<home>/Downloads`.
pub fn resolve_target_path(explicit: Option<PathBuf>) -> OrganizeResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => dirs::home_dir()
            .map(|home| home.join("Downloads"))
            .ok_or(OrganizeError::HomeDirUnavailable),
    }
}

/// Runs the CLI application.
///
/// # Examples
///
/// ```no_run
/// use downsort::cli::{Cli, run_cli};
/// use std::path::PathBuf;
///
/// let cli = Cli { path: Some(PathBuf::from("/home/user/Downloads")) };
/// match run_cli(cli) {
///     Ok(report) => println!("moved {} files", report.moved),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: Cli) -> OrganizeResult<OrganizeReport> {
    let target = resolve_target_path(cli.path)?;
    organize_directory(&target)
}

/// Organizes files in `root` with the default options.
pub fn organize_directory(root: &Path) -> OrganizeResult<OrganizeReport> {
    organize_directory_with_options(root, OrganizeOptions::default())
}

/// Organizes files in `root` into category subdirectories.
///
/// One sequential pass: prepare the category directories, then classify
/// and move each top-level entry. Subdirectories and excluded names are
/// skipped. A single file's move failure is logged and does not abort the
/// run; only a missing or malformed root aborts before any mutation.
pub fn organize_directory_with_options(
    root: &Path,
    options: OrganizeOptions,
) -> OrganizeResult<OrganizeReport> {
    let created = prepare_directories(root, &options.map)?;

    OutputFormatter::info(&format!("Organizing files in {}", root.display()));
    for dir in &created {
        OutputFormatter::info(&format!("Created directory: {}", dir.display()));
    }

    let classifier = Classifier::new(options.map, options.reference_time, options.excluded_names);

    let entries = fs::read_dir(root).map_err(|e| OrganizeError::ScanFailed {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut report = OrganizeReport::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                OutputFormatter::error(&format!("Error reading directory entry: {}", e));
                report.skipped += 1;
                continue;
            }
        };
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = path.is_dir();

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(time) => DateTime::<Local>::from(time),
            Err(e) => {
                OutputFormatter::error(&format!("Error reading metadata for {}: {}", name, e));
                report.skipped += 1;
                continue;
            }
        };

        let destination = classifier.classify(&name, is_dir, modified);
        let Some(dir_name) = destination.dir_name() else {
            report.skipped += 1;
            continue;
        };

        match SafeMover::move_file(&path, &root.join(dir_name)) {
            Ok(final_path) => {
                OutputFormatter::success(&format!("Moved {} to {}", name, final_path.display()));
                report.moved += 1;
            }
            Err(e) => {
                OutputFormatter::error(&format!("Error moving {}: {}", name, e));
            }
        }
    }

    OutputFormatter::info(&format!(
        "Organization complete: {} files moved, {} files skipped.",
        report.moved, report.skipped
    ));

    Ok(report)
}
