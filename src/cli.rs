//! Command-line interface module for foldersort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration loading
//! - Sorting orchestration and dry runs
//! - Summary reporting and the optional end-of-run confirmation

use crate::config::{ConfigError, SorterConfig};
use crate::confirm::Confirmation;
use crate::output::OutputFormatter;
use crate::sorter::{FolderSorter, SortError, resolve_directory};
use crate::summary::Summary;
use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sort the files of a folder into category subfolders by extension.
#[derive(Debug, Parser)]
#[command(name = "foldersort", version, about)]
pub struct Cli {
    /// Folder to sort (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// File names that must not be moved (put `--` before names starting with '-')
    pub excluded: Vec<String>,

    /// Do not print the summary at the end
    #[arg(short, long)]
    pub silent: bool,

    /// Wait for a key press after the summary
    #[arg(short, long)]
    pub wait: bool,

    /// Show what would be moved without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// TOML file with categories and exclusions
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a sorting run needs.
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// Folder to sort; `None` means the current directory.
    pub directory: Option<PathBuf>,
    /// Extra file names to leave in place.
    pub excluded: Vec<String>,
    /// File name of the running program, always excluded.
    pub program_file_name: String,
    pub silent: bool,
    pub wait: bool,
    pub dry_run: bool,
    pub json: bool,
    pub config_path: Option<PathBuf>,
}

impl SortOptions {
    /// Builds run options from parsed arguments.
    pub fn from_cli(cli: Cli, program_file_name: impl Into<String>) -> Self {
        Self {
            directory: cli.directory,
            excluded: cli.excluded,
            program_file_name: program_file_name.into(),
            silent: cli.silent,
            wait: cli.wait,
            dry_run: cli.dry_run,
            json: cli.json,
            config_path: cli.config,
        }
    }
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sort(#[from] SortError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read confirmation: {0}")]
    Confirmation(#[source] std::io::Error),
}

/// Returns the file name of the running program.
///
/// Falls back to `foldersort` when the name cannot be determined.
pub fn program_file_name(arg0: Option<&str>) -> String {
    arg0.and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "foldersort".to_string())
}

/// Runs one sorting pass.
///
/// Loads the configuration (if any), sorts or dry-runs the folder, prints the
/// report unless `silent`, and finally asks `confirmation` to wait when
/// `wait` is set and the run is not silent.
///
/// Per-file failures are printed once: in the report, in the JSON output, or
/// on stderr when `silent`.
///
/// # Errors
///
/// Only fatal problems are errors: a missing directory or a bad
/// configuration. Per-file failures are part of the returned [`Summary`].
///
/// # Examples
///
/// ```no_run
/// use foldersort::cli::{SortOptions, run_sort};
/// use foldersort::confirm::NoConfirmation;
///
/// let options = SortOptions {
///     directory: Some("/home/user/Downloads".into()),
///     program_file_name: "foldersort".to_string(),
///     silent: true,
///     ..Default::default()
/// };
/// let summary = run_sort(&options, &mut NoConfirmation).expect("sort failed");
/// println!("{} files moved", summary.total_moved());
/// ```
pub fn run_sort(
    options: &SortOptions,
    confirmation: &mut dyn Confirmation,
) -> Result<Summary, CliError> {
    let config = SorterConfig::load(options.config_path.as_deref())?;
    let table = config.to_table()?;
    let directory = resolve_directory(options.directory.as_deref())?;

    let sorter = FolderSorter::new(table, options.program_file_name.clone())
        .with_excluded(config.exclude.iter().cloned())
        .with_excluded(options.excluded.iter().cloned());

    let show_text = !options.silent && !options.json;

    let summary = if options.dry_run {
        if show_text {
            OutputFormatter::dry_run_notice(&format!(
                "Analyzing contents of: {}",
                directory.display()
            ));
        }
        sorter.dry_run(&directory)?
    } else {
        if show_text {
            OutputFormatter::info(&format!("Sorting contents of: {}", directory.display()));
        }
        let planned = sorter.plan(&directory)?;
        let pb = OutputFormatter::create_progress_bar(planned.len() as u64, show_text);
        let summary = sorter.execute(&directory, &planned, |item| {
            pb.set_message(item.file_name.clone());
            pb.inc(1);
        });
        pb.finish_and_clear();
        summary
    };

    if !options.silent {
        if options.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            OutputFormatter::summary_report(&summary);
            if summary.dry_run {
                OutputFormatter::dry_run_notice("No files were modified.");
            } else if !summary.has_failures() {
                OutputFormatter::success("Sorting complete!");
            }
        }

        if options.wait {
            confirmation
                .confirm("Press any key to continue . . .")
                .map_err(CliError::Confirmation)?;
        }
    } else {
        for failure in &summary.failures {
            OutputFormatter::error(&failure.to_string());
        }
    }

    Ok(summary)
}
