//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status lines,
//! the progress bar shown while files move, and the end-of-run summary.

use crate::summary::Summary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::error("Directory not found: /tmp/missing");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for `total` files.
    ///
    /// A hidden bar is returned when `visible` is false so callers can tick
    /// it unconditionally.
    pub fn create_progress_bar(total: u64, visible: bool) -> ProgressBar {
        if !visible {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Renders the per-category lines of a summary.
    ///
    /// Only categories that received files are listed, each followed by its
    /// file names indented by two spaces.
    ///
    /// ```
    /// use foldersort::category::CategoryTable;
    /// use foldersort::output::OutputFormatter;
    /// use foldersort::summary::Summary;
    ///
    /// let mut summary = Summary::new(&CategoryTable::default());
    /// summary.record("Docs", "report.pdf");
    /// assert_eq!(
    ///     OutputFormatter::summary_lines(&summary),
    ///     vec!["1 file moved to Docs", "  report.pdf"]
    /// );
    /// ```
    pub fn summary_lines(summary: &Summary) -> Vec<String> {
        let verb = if summary.dry_run {
            "would be moved to"
        } else {
            "moved to"
        };

        let mut lines = Vec::new();
        for bucket in summary.non_empty() {
            let count = bucket.files.len();
            lines.push(format!(
                "{} {} {} {}",
                count,
                if count == 1 { "file" } else { "files" },
                verb,
                bucket.category
            ));
            lines.extend(bucket.files.iter().map(|name| format!("  {}", name)));
        }
        lines
    }

    /// Prints the end-of-run report for a summary to stdout.
    pub fn summary_report(summary: &Summary) {
        let stdout = io::stdout();
        if let Err(e) = Self::write_summary_report(&mut stdout.lock(), summary) {
            log::debug!("Failed to print summary: {}", e);
        }
    }

    /// Writes the end-of-run report: the [`summary_lines`](Self::summary_lines),
    /// then every recorded failure under an `ERRORS` header.
    ///
    /// "No files to sort." is only written when nothing moved and nothing
    /// failed.
    pub fn write_summary_report<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
        writeln!(out, "\n{}", "SUMMARY".bold())?;

        if summary.total_moved() == 0 && !summary.has_failures() {
            writeln!(out, "{}", "No files to sort.".cyan())?;
        }

        for line in Self::summary_lines(summary) {
            if line.starts_with(' ') {
                writeln!(out, "{}", line)?;
            } else {
                writeln!(out, "{}", line.as_str().bold())?;
            }
        }

        if summary.has_failures() {
            writeln!(out, "\n{}", "ERRORS".bold())?;
            for failure in &summary.failures {
                writeln!(out, "{} {}", "✗".red(), failure)?;
            }
            writeln!(
                out,
                "{} Some files could not be sorted. Please review errors above.",
                "⚠".yellow()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryTable;
    use crate::summary::{FailureKind, SortFailure};
    use std::path::PathBuf;

    fn report(summary: &Summary) -> String {
        let mut out = Vec::new();
        OutputFormatter::write_summary_report(&mut out, summary).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn move_failure(path: &str) -> SortFailure {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        SortFailure::from_io(FailureKind::Move, PathBuf::from(path), &err)
    }

    #[test]
    fn test_summary_lines_skip_empty_categories() {
        let mut summary = Summary::new(&CategoryTable::default());
        summary.record("Images", "b.png");
        summary.record("Images", "a.jpg");
        summary.record("Docs", "r.pdf");

        assert_eq!(
            OutputFormatter::summary_lines(&summary),
            vec![
                "1 file moved to Docs",
                "  r.pdf",
                "2 files moved to Images",
                "  b.png",
                "  a.jpg",
            ]
        );
    }

    #[test]
    fn test_summary_lines_dry_run_wording() {
        let mut summary = Summary::new(&CategoryTable::default());
        summary.dry_run = true;
        summary.record("Audio", "song.mp3");

        assert_eq!(
            OutputFormatter::summary_lines(&summary)[0],
            "1 file would be moved to Audio"
        );
    }

    #[test]
    fn test_summary_lines_empty() {
        let summary = Summary::new(&CategoryTable::default());
        assert!(OutputFormatter::summary_lines(&summary).is_empty());
    }

    #[test]
    fn test_hidden_progress_bar() {
        let pb = OutputFormatter::create_progress_bar(3, false);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_report_lists_moved_files() {
        let mut summary = Summary::new(&CategoryTable::default());
        summary.record("Docs", "report.pdf");
        summary.record("Images", "photo.JPG");

        let text = report(&summary);
        assert!(text.contains("SUMMARY"));
        assert!(text.contains("1 file moved to Docs"));
        assert!(text.contains("  report.pdf"));
        assert!(text.contains("1 file moved to Images"));
        assert!(text.contains("  photo.JPG"));
        assert!(!text.contains("No files to sort."));
        assert!(!text.contains("ERRORS"));
    }

    #[test]
    fn test_report_empty_run() {
        let summary = Summary::new(&CategoryTable::default());
        let text = report(&summary);
        assert!(text.contains("No files to sort."));
        assert!(!text.contains("ERRORS"));
    }

    #[test]
    fn test_report_when_every_move_failed() {
        let mut summary = Summary::new(&CategoryTable::default());
        summary.record_failure(move_failure("/tmp/dl/a.pdf"));
        summary.record_failure(move_failure("/tmp/dl/b.png"));

        let text = report(&summary);
        assert!(!text.contains("No files to sort."));
        assert!(text.contains("ERRORS"));
        assert!(text.contains("Failed to move /tmp/dl/a.pdf"));
        assert!(text.contains("Failed to move /tmp/dl/b.png"));
        assert_eq!(text.matches("Failed to move").count(), 2);
        assert!(text.contains("Some files could not be sorted"));
    }
}
