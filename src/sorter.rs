/// Folder sorting: moving files into category subdirectories.
///
/// [`FolderSorter`] scans the direct children of a directory, classifies each
/// regular file with a [`CategoryTable`], creates the category folder when
/// needed and moves the file into it. A file that already exists in the
/// category folder is overwritten.
///
/// Only a missing or unreadable source directory aborts a run. Failures to
/// create a folder or to move a file are recorded in the returned
/// [`Summary`] and the run carries on with the next file.
use crate::category::CategoryTable;
use crate::summary::{FailureKind, SortFailure, Summary};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors that stop a run before any file is touched.
#[derive(Debug, Error)]
pub enum SortError {
    /// The directory to sort does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// The path to sort exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// The directory could not be listed.
    #[error("Error reading directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No directory was given and the working directory is unavailable.
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;

/// A file that a category has claimed, before it is moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// The file name inside the sorted directory.
    pub file_name: String,
    /// Full path of the file.
    pub source: PathBuf,
    /// Name of the category (and destination folder).
    pub category: String,
}

/// How a file reached its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The destination was free and the file was moved there.
    Moved(PathBuf),
    /// A file with the same name was replaced.
    Overwritten(PathBuf),
}

/// Sorts the files of a directory into category folders.
#[derive(Debug, Clone)]
pub struct FolderSorter {
    table: CategoryTable,
    excluded: HashSet<String>,
}

impl FolderSorter {
    /// Creates a sorter for `table`.
    ///
    /// `program_file_name` is the file name of the running program. It is
    /// always excluded so the program never moves itself.
    pub fn new(table: CategoryTable, program_file_name: impl Into<String>) -> Self {
        let mut excluded = HashSet::new();
        excluded.insert(program_file_name.into());
        Self { table, excluded }
    }

    /// Adds file names that must never be moved.
    pub fn with_excluded<I, S>(mut self, file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(file_names.into_iter().map(Into::into));
        self
    }

    /// Returns true if `file_name` is on the exclusion list.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded.contains(file_name)
    }

    /// Lists the files that would be moved, without touching anything.
    ///
    /// Directories, excluded names and files no category claims are skipped.
    /// The result is ordered by file name.
    ///
    /// # Errors
    ///
    /// Returns a [`SortError`] if `directory` is missing, is not a
    /// directory, or cannot be listed.
    pub fn plan(&self, directory: &Path) -> SortResult<Vec<PlannedMove>> {
        check_directory(directory)?;

        let entries = fs::read_dir(directory).map_err(|e| SortError::ReadDir {
            path: directory.to_path_buf(),
            source: e,
        })?;

        let mut planned = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if self.is_excluded(&file_name) {
                log::debug!("Skipping excluded file {}", file_name);
                continue;
            }

            match self.table.classify(&file_name) {
                Some(category) => planned.push(PlannedMove {
                    file_name,
                    source: path,
                    category: category.name().to_string(),
                }),
                None => log::debug!("No category for {}", file_name),
            }
        }

        planned.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(planned)
    }

    /// Sorts `directory` and returns what was moved.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foldersort::category::CategoryTable;
    /// use foldersort::sorter::FolderSorter;
    /// use std::path::Path;
    ///
    /// let sorter = FolderSorter::new(CategoryTable::default(), "foldersort");
    /// match sorter.sort(Path::new("/home/user/Downloads")) {
    ///     Ok(summary) => println!("Moved {} files", summary.total_moved()),
    ///     Err(e) => eprintln!("Sorting failed: {}", e),
    /// }
    /// ```
    pub fn sort(&self, directory: &Path) -> SortResult<Summary> {
        self.sort_with_progress(directory, |_| {})
    }

    /// Sorts `directory`, calling `on_file` after each candidate is handled.
    pub fn sort_with_progress<F>(&self, directory: &Path, on_file: F) -> SortResult<Summary>
    where
        F: FnMut(&PlannedMove),
    {
        let planned = self.plan(directory)?;
        Ok(self.execute(directory, &planned, on_file))
    }

    /// Moves the files of a plan made by [`FolderSorter::plan`].
    ///
    /// Every failure is recorded in the summary; nothing here aborts.
    pub fn execute<F>(&self, directory: &Path, planned: &[PlannedMove], mut on_file: F) -> Summary
    where
        F: FnMut(&PlannedMove),
    {
        log::info!(
            "Sorting {} file(s) in {}",
            planned.len(),
            directory.display()
        );

        let mut summary = Summary::new(&self.table);
        let mut failed_folders: HashSet<&str> = HashSet::new();

        for item in planned {
            let folder = directory.join(&item.category);

            // The move is still attempted when the folder cannot be created.
            if let Err(e) = ensure_folder(&folder)
                && failed_folders.insert(item.category.as_str())
            {
                let failure = SortFailure::from_io(FailureKind::CreateFolder, folder.clone(), &e);
                log::debug!("{}", failure);
                summary.record_failure(failure);
            }

            match move_file(&item.source, &folder) {
                Ok(MoveOutcome::Moved(dest)) => {
                    log::debug!("Moved {} to {}", item.source.display(), dest.display());
                    summary.record(&item.category, item.file_name.clone());
                }
                Ok(MoveOutcome::Overwritten(dest)) => {
                    log::debug!("Overwrote {} with {}", dest.display(), item.source.display());
                    summary.record(&item.category, item.file_name.clone());
                }
                Err(e) => {
                    let failure = SortFailure::from_io(FailureKind::Move, item.source.clone(), &e);
                    log::debug!("{}", failure);
                    summary.record_failure(failure);
                }
            }

            on_file(item);
        }

        summary
    }

    /// Builds the summary a real run would produce, without moving anything.
    pub fn dry_run(&self, directory: &Path) -> SortResult<Summary> {
        let mut summary = Summary::new(&self.table);
        summary.dry_run = true;
        for item in self.plan(directory)? {
            summary.record(&item.category, item.file_name);
        }
        Ok(summary)
    }
}

/// Resolves the directory to sort, defaulting to the working directory.
pub fn resolve_directory(directory: Option<&Path>) -> SortResult<PathBuf> {
    match directory {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(SortError::CurrentDir),
    }
}

fn check_directory(directory: &Path) -> SortResult<()> {
    match fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(SortError::NotADirectory(directory.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SortError::DirectoryNotFound(directory.to_path_buf()))
        }
        Err(e) => Err(SortError::ReadDir {
            path: directory.to_path_buf(),
            source: e,
        }),
    }
}

/// Creates `folder` unless it is already a directory.
fn ensure_folder(folder: &Path) -> io::Result<()> {
    if folder.is_dir() {
        return Ok(());
    }
    fs::create_dir(folder)
}

/// Moves `source` into `folder`, replacing a file of the same name.
fn move_file(source: &Path, folder: &Path) -> io::Result<MoveOutcome> {
    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "file has no name component")
    })?;
    let destination = folder.join(file_name);

    if destination.exists() {
        fs::copy(source, &destination)?;
        fs::remove_file(source)?;
        return Ok(MoveOutcome::Overwritten(destination));
    }

    match fs::rename(source, &destination) {
        Ok(()) => Ok(MoveOutcome::Moved(destination)),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, &destination)?;
            fs::remove_file(source)?;
            Ok(MoveOutcome::Moved(destination))
        }
        Err(e) => Err(e),
    }
}
