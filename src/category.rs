/// Extension-based file categorization.
///
/// A [`CategoryTable`] is an ordered list of [`Category`] buckets. Each bucket
/// owns a set of lowercase extensions. Classification walks the table in
/// order and the first category with a matching extension wins, so two
/// categories may claim the same extension and the earlier one takes it.
///
/// # Examples
///
/// ```
/// use foldersort::category::CategoryTable;
///
/// let table = CategoryTable::default();
/// assert_eq!(table.classify("report.pdf").map(|c| c.name()), Some("Docs"));
/// assert_eq!(table.classify("photo.JPG").map(|c| c.name()), Some("Images"));
/// assert_eq!(table.classify("notes.xyz"), None);
/// ```
use std::collections::BTreeSet;

/// A named bucket of file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    extensions: BTreeSet<String>,
}

impl Category {
    /// Creates a category from a name and its extensions.
    ///
    /// Extensions are normalized: surrounding whitespace and a leading dot are
    /// stripped and the result is lowercased. Empty entries are dropped.
    ///
    /// ```
    /// use foldersort::category::Category;
    ///
    /// let docs = Category::new("Docs", [".PDF", "txt", "txt"]);
    /// assert_eq!(docs.extensions().collect::<Vec<_>>(), vec!["pdf", "txt"]);
    /// ```
    pub fn new<I, S>(name: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        Self {
            name: name.into(),
            extensions,
        }
    }

    /// The category name, also used as the destination folder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized extensions of this category, in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Returns the extension matching `file_name`, if any.
    ///
    /// The match is a case-insensitive suffix test against `.<extension>`,
    /// so `archive.tar.gz` matches `gz`.
    pub fn matching_extension(&self, file_name: &str) -> Option<&str> {
        let lower = file_name.to_lowercase();
        self.extensions
            .iter()
            .find(|ext| {
                lower
                    .strip_suffix(ext.as_str())
                    .is_some_and(|stem| stem.ends_with('.'))
            })
            .map(String::as_str)
    }
}

/// An extension claimed by more than one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionOverlap {
    /// The shared extension.
    pub extension: String,
    /// The category that wins, being earlier in the table.
    pub winner: String,
    /// The later category that never receives files with this extension.
    pub shadowed: String,
}

/// An ordered list of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Appends a category at the end of the table.
    pub fn push(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Returns the categories in iteration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Finds the category for a file name.
    ///
    /// Categories are tried in table order and the first match wins.
    /// Returns `None` when no category claims the file.
    pub fn classify(&self, file_name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.matching_extension(file_name).is_some())
    }

    /// Lists every extension that appears in more than one category.
    ///
    /// Each shadowed category is reported against the first category that
    /// claims the extension.
    pub fn overlaps(&self) -> Vec<ExtensionOverlap> {
        let mut overlaps = Vec::new();
        for (i, later) in self.categories.iter().enumerate() {
            for ext in &later.extensions {
                if let Some(winner) = self.categories[..i]
                    .iter()
                    .find(|earlier| earlier.extensions.contains(ext))
                {
                    overlaps.push(ExtensionOverlap {
                        extension: ext.clone(),
                        winner: winner.name.clone(),
                        shadowed: later.name.clone(),
                    });
                }
            }
        }
        overlaps
    }

    /// The built-in table.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.push(Category::new("gDesktop Plugins", ["gg", "ggc"]));
        table.push(Category::new("Torrents", ["torrent"]));
        table.push(Category::new(
            "Docs",
            [
                "doc", "xls", "ppt", "mdb", "pub", "docx", "pptx", "xlsx", "pdf", "rtf", "ppsx",
                "csv", "vcf", "txt", "text",
            ],
        ));
        table.push(Category::new(
            "Images",
            ["jpg", "jpeg", "png", "gif", "psd", "psb", "ai", "svg", "dng"],
        ));
        table.push(Category::new(
            "Videos",
            ["mpg", "mp4", "mkv", "srt", "wmv", "mov"],
        ));
        table.push(Category::new("Audio", ["mp3", "wma"]));
        table.push(Category::new(
            "Programming",
            [
                "py",
                "pyc",
                "pyo",
                "pyw",
                "pl",
                "v",
                "c",
                "dat",
                "ecf",
                "unitypackage",
            ],
        ));
        table.push(Category::new(
            "Executables",
            [
                "exe",
                "msi",
                "apk",
                "bat",
                "jar",
                "jnlp",
                "swf",
                "reg",
                "vbox-extpack",
            ],
        ));
        table.push(Category::new(
            "Compressed",
            ["rar", "zip", "iso", "tgz", "gz", "7z", "ova"],
        ));
        table
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lowercases an extension and strips a leading dot.
pub(crate) fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of<'a>(table: &'a CategoryTable, file: &str) -> Option<&'a str> {
        table.classify(file).map(Category::name)
    }

    #[test]
    fn test_standard_table_order() {
        let table = CategoryTable::default();
        let names: Vec<_> = table.categories().iter().map(Category::name).collect();
        assert_eq!(
            names,
            vec![
                "gDesktop Plugins",
                "Torrents",
                "Docs",
                "Images",
                "Videos",
                "Audio",
                "Programming",
                "Executables",
                "Compressed",
            ]
        );
    }

    #[test]
    fn test_classify_standard_extensions() {
        let table = CategoryTable::default();
        assert_eq!(name_of(&table, "report.pdf"), Some("Docs"));
        assert_eq!(name_of(&table, "song.mp3"), Some("Audio"));
        assert_eq!(name_of(&table, "clip.mov"), Some("Videos"));
        assert_eq!(name_of(&table, "clip.wmv"), Some("Videos"));
        assert_eq!(name_of(&table, "setup.exe"), Some("Executables"));
        assert_eq!(name_of(&table, "ubuntu.iso"), Some("Compressed"));
        assert_eq!(name_of(&table, "linux.torrent"), Some("Torrents"));
        assert_eq!(name_of(&table, "plugin.ggc"), Some("gDesktop Plugins"));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(name_of(&table, "photo.JPG"), Some("Images"));
        assert_eq!(name_of(&table, "Setup.ExE"), Some("Executables"));
    }

    #[test]
    fn test_classify_uses_final_suffix() {
        let table = CategoryTable::default();
        assert_eq!(name_of(&table, "backup.tar.gz"), Some("Compressed"));
        assert_eq!(name_of(&table, "image.vbox-extpack"), Some("Executables"));
        assert_eq!(name_of(&table, "pdf"), None);
        assert_eq!(name_of(&table, "notes.xyz"), None);
        assert_eq!(name_of(&table, "Makefile"), None);
    }

    #[test]
    fn test_suffix_requires_dot_boundary() {
        let table = CategoryTable::default();
        // "topic" ends with "c" but not with ".c"
        assert_eq!(name_of(&table, "topic"), None);
        assert_eq!(name_of(&table, "main.c"), Some("Programming"));
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = CategoryTable::new();
        table.push(Category::new("First", ["dat"]));
        table.push(Category::new("Second", ["dat", "bin"]));

        assert_eq!(name_of(&table, "save.dat"), Some("First"));
        assert_eq!(name_of(&table, "save.bin"), Some("Second"));
    }

    #[test]
    fn test_overlaps_report_shadowed_category() {
        let mut table = CategoryTable::new();
        table.push(Category::new("First", ["dat"]));
        table.push(Category::new("Second", ["dat", "bin"]));
        table.push(Category::new("Third", ["DAT"]));

        let overlaps = table.overlaps();
        assert_eq!(overlaps.len(), 2);
        assert_eq!(overlaps[0].winner, "First");
        assert_eq!(overlaps[0].shadowed, "Second");
        assert_eq!(overlaps[1].winner, "First");
        assert_eq!(overlaps[1].shadowed, "Third");
    }

    #[test]
    fn test_standard_table_has_no_overlaps() {
        assert!(CategoryTable::default().overlaps().is_empty());
    }

    #[test]
    fn test_extension_normalization() {
        let category = Category::new("Docs", [" .PDF ", "", ".", "TXT"]);
        assert_eq!(category.extensions().collect::<Vec<_>>(), vec!["pdf", "txt"]);
        assert_eq!(category.matching_extension("a.Txt"), Some("txt"));
    }
}
