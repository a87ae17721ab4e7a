//! Per-run record of what was moved where.
//!
//! A [`Summary`] keeps one bucket per category, in table order, and the list
//! of non-fatal failures met along the way. It is built fresh by every run
//! and never written to disk.

use crate::category::CategoryTable;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Files moved into one category during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// The category name.
    pub category: String,
    /// Moved file names, in processing order.
    pub files: Vec<String>,
}

/// What went wrong for a non-fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A category folder could not be created.
    CreateFolder,
    /// A file could not be moved or copied.
    Move,
}

/// A non-fatal failure recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortFailure {
    pub kind: FailureKind,
    /// The folder or file the operation was acting on.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    /// The underlying I/O error kind, e.g. "permission denied".
    pub status: String,
    /// The full error message.
    pub reason: String,
}

impl SortFailure {
    pub(crate) fn from_io(kind: FailureKind, path: PathBuf, err: &std::io::Error) -> Self {
        Self {
            kind,
            path,
            status: err.kind().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Paths are written as text even when they are not valid UTF-8.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl std::fmt::Display for SortFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FailureKind::CreateFolder => write!(
                f,
                "Failed to create folder {} ({}): {}",
                self.path.display(),
                self.status,
                self.reason
            ),
            FailureKind::Move => write!(
                f,
                "Failed to move {} ({}): {}",
                self.path.display(),
                self.status,
                self.reason
            ),
        }
    }
}

/// The result of one sorting run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// One entry per category of the table, in table order.
    pub categories: Vec<CategorySummary>,
    /// Failures that did not stop the run.
    pub failures: Vec<SortFailure>,
    /// True when nothing was actually moved because this was a dry run.
    pub dry_run: bool,
}

impl Summary {
    /// Creates an empty summary with one bucket per category of `table`.
    pub fn new(table: &CategoryTable) -> Self {
        Self {
            categories: table
                .categories()
                .iter()
                .map(|c| CategorySummary {
                    category: c.name().to_string(),
                    files: Vec::new(),
                })
                .collect(),
            failures: Vec::new(),
            dry_run: false,
        }
    }

    /// Appends a file name to a category bucket.
    ///
    /// A bucket is added at the end if the category is unknown.
    pub fn record(&mut self, category: &str, file_name: impl Into<String>) {
        let file_name = file_name.into();
        match self.categories.iter_mut().find(|c| c.category == category) {
            Some(bucket) => bucket.files.push(file_name),
            None => self.categories.push(CategorySummary {
                category: category.to_string(),
                files: vec![file_name],
            }),
        }
    }

    pub fn record_failure(&mut self, failure: SortFailure) {
        self.failures.push(failure);
    }

    /// Files moved into `category`, empty if none.
    pub fn files(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.files.as_slice())
            .unwrap_or(&[])
    }

    /// Number of files moved into `category`.
    pub fn count(&self, category: &str) -> usize {
        self.files(category).len()
    }

    /// Total number of moved files.
    pub fn total_moved(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }

    /// Buckets that received at least one file.
    pub fn non_empty(&self) -> impl Iterator<Item = &CategorySummary> {
        self.categories.iter().filter(|c| !c.files.is_empty())
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn table() -> CategoryTable {
        let mut table = CategoryTable::new();
        table.push(Category::new("Docs", ["pdf"]));
        table.push(Category::new("Images", ["png"]));
        table
    }

    #[test]
    fn test_new_summary_has_empty_buckets_in_order() {
        let summary = Summary::new(&table());
        let names: Vec<_> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Docs", "Images"]);
        assert_eq!(summary.total_moved(), 0);
        assert_eq!(summary.non_empty().count(), 0);
        assert!(!summary.dry_run);
    }

    #[test]
    fn test_record_keeps_order() {
        let mut summary = Summary::new(&table());
        summary.record("Images", "b.png");
        summary.record("Images", "a.png");
        summary.record("Docs", "r.pdf");

        assert_eq!(summary.files("Images"), ["b.png", "a.png"]);
        assert_eq!(summary.count("Docs"), 1);
        assert_eq!(summary.total_moved(), 3);
        assert_eq!(summary.count("Videos"), 0);
    }

    #[test]
    fn test_record_unknown_category_appends_bucket() {
        let mut summary = Summary::new(&table());
        summary.record("Misc", "x.bin");
        assert_eq!(summary.categories.last().map(|c| c.category.as_str()), Some("Misc"));
        assert_eq!(summary.count("Misc"), 1);
    }

    #[test]
    fn test_failure_display() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let failure = SortFailure::from_io(FailureKind::Move, PathBuf::from("/tmp/a.pdf"), &err);
        assert_eq!(failure.status, "permission denied");
        let text = failure.to_string();
        assert!(text.contains("/tmp/a.pdf"));
        assert!(text.contains("permission denied"));
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let mut summary = Summary::new(&table());
        summary.record("Docs", "r.pdf");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["categories"][0]["category"], "Docs");
        assert_eq!(json["categories"][0]["files"][0], "r.pdf");
        assert_eq!(json["dry_run"], false);
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_with_non_utf8_path_serializes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = PathBuf::from(OsStr::from_bytes(b"/tmp/bad\xff.pdf"));
        let err = std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory");
        let mut summary = Summary::new(&table());
        summary.record_failure(SortFailure::from_io(FailureKind::Move, path, &err));

        let json = serde_json::to_value(&summary).expect("Summary should serialize");
        assert_eq!(json["failures"][0]["path"], "/tmp/bad\u{FFFD}.pdf");
        assert_eq!(json["failures"][0]["kind"], "move");
    }
}
