//! foldersort - sort a folder's files into category subfolders
//!
//! This library classifies files by extension against an ordered category
//! table, moves them into one subfolder per category and reports what moved
//! where. It also ships a small acronym builder.

pub mod acronym;
pub mod category;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod output;
pub mod sorter;
pub mod summary;

pub use acronym::make_acronym;
pub use category::{Category, CategoryTable};
pub use config::{ConfigError, SorterConfig};
pub use confirm::{Confirmation, NoConfirmation, TerminalConfirmation};
pub use sorter::{FolderSorter, SortError};
pub use summary::Summary;

pub use cli::{Cli, SortOptions, run_sort};
