/// File classification for directory organization.
///
/// This module maps file extensions to broad categories and decides, for
/// each directory entry, which destination subdirectory it belongs in.
/// Files older than the age threshold are routed to "Old Files" regardless
/// of their extension.
///
/// # Examples
///
/// ```
/// use downsort::file_category::{Category, CategoryMap};
///
/// let map = CategoryMap::default();
/// assert_eq!(map.category_for_extension("pdf"), Some(Category::Documents));
/// assert_eq!(map.category_for_extension("PNG"), Some(Category::Images));
/// assert_eq!(map.category_for_extension("xyz"), None);
/// ```
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::Path;

/// Files whose age in whole days strictly exceeds this go to "Old Files".
pub const OLD_FILE_AGE_DAYS: i64 = 30;

/// Directory name for files with no matching category.
pub const OTHERS_DIR: &str = "Others";

/// Directory name for files past the age threshold.
pub const OLD_FILES_DIR: &str = "Old Files";

/// Represents a broad file category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Office and text documents (PDF, DOCX, TXT, etc.)
    Documents,
    /// Image files (PNG, JPG, GIF, etc.)
    Images,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Video files (MP4, MKV, AVI, etc.)
    Video,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archives,
    /// Source code and markup files (Python, C, HTML, etc.)
    Code,
    /// Installers and executables (EXE, MSI, DEB, etc.)
    Executables,
}

impl Category {
    /// Returns the subdirectory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use downsort::file_category::Category;
    ///
    /// assert_eq!(Category::Documents.dir_name(), "Documents");
    /// assert_eq!(Category::Executables.dir_name(), "Executables");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Audio => "Audio",
            Category::Video => "Video",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Executables => "Executables",
        }
    }
}

/// Ordered mapping from categories to their file extensions.
///
/// The table is built once at startup and never mutated afterwards.
/// Lookup scans entries in definition order and the first match wins,
/// so behavior stays deterministic even if a custom table carries
/// overlapping extension sets.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: Vec<(Category, Vec<String>)>,
}

impl CategoryMap {
    /// Creates the standard extension table.
    pub fn new() -> Self {
        let table: &[(Category, &[&str])] = &[
            (
                Category::Documents,
                &[
                    "pdf", "docx", "txt", "doc", "rtf", "odt", "xlsx", "xls", "pptx", "ppt", "csv",
                ],
            ),
            (
                Category::Images,
                &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "svg", "webp"],
            ),
            (Category::Audio, &["mp3", "wav", "aac", "flac", "ogg", "m4a"]),
            (
                Category::Video,
                &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm"],
            ),
            (Category::Archives, &["zip", "rar", "7z", "tar", "gz", "bz2"]),
            (
                Category::Code,
                &[
                    "py", "java", "html", "css", "js", "php", "c", "cpp", "h", "rb", "json", "xml",
                ],
            ),
            (
                Category::Executables,
                &["exe", "msi", "app", "dmg", "deb", "rpm"],
            ),
        ];

        Self::from_entries(
            table
                .iter()
                .map(|(category, exts)| (*category, exts.iter().map(|e| e.to_string()).collect()))
                .collect(),
        )
    }

    /// Creates a table from explicit entries, preserving their order.
    ///
    /// Extensions are normalized to lowercase. Mainly useful for testing
    /// with alternate mappings.
    pub fn from_entries(entries: Vec<(Category, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(category, exts)| {
                (category, exts.into_iter().map(|e| e.to_lowercase()).collect())
            })
            .collect();
        Self { entries }
    }

    /// Returns the first category whose extension set contains `ext`.
    ///
    /// Matching is case-insensitive and expects the extension without its
    /// leading dot, as produced by `Path::extension`. Compound suffixes are
    /// not special-cased: `archive.tar.gz` looks up `gz`.
    pub fn category_for_extension(&self, ext: &str) -> Option<Category> {
        let ext = ext.to_lowercase();
        self.entries
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| *e == ext))
            .map(|(category, _)| *category)
    }

    /// Iterates over the categories in table order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(category, _)| *category)
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a single directory entry should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The entry is left untouched (directories, excluded names).
    Skip,
    /// The entry is past the age threshold.
    OldFiles,
    /// The entry matched a category by extension.
    Category(Category),
    /// No category matched.
    Others,
}

impl Destination {
    /// Returns the subdirectory name for this destination, or `None` for
    /// entries that are not moved at all.
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            Destination::Skip => None,
            Destination::OldFiles => Some(OLD_FILES_DIR),
            Destination::Category(category) => Some(category.dir_name()),
            Destination::Others => Some(OTHERS_DIR),
        }
    }
}

/// Decides the destination for directory entries.
///
/// The reference timestamp is captured once per run so age comparisons are
/// consistent across all entries of that run.
#[derive(Debug, Clone)]
pub struct Classifier {
    map: CategoryMap,
    today: DateTime<Local>,
    excluded_names: HashSet<String>,
}

impl Classifier {
    /// Creates a classifier over the given table and reference time.
    ///
    /// `excluded_names` lists entry names that must never be moved, such as
    /// the program's own artifact when it sits in the scanned directory.
    pub fn new(map: CategoryMap, today: DateTime<Local>, excluded_names: HashSet<String>) -> Self {
        Self {
            map,
            today,
            excluded_names,
        }
    }

    /// Classifies one entry, evaluated in precedence order:
    ///
    /// 1. `Skip` for directories and excluded names.
    /// 2. `OldFiles` when the age in whole days strictly exceeds the
    ///    threshold (exactly 30 days is not old).
    /// 3. The first category whose extension set matches.
    /// 4. `Others` otherwise.
    pub fn classify(&self, name: &str, is_dir: bool, modified: DateTime<Local>) -> Destination {
        if is_dir || self.excluded_names.contains(name) {
            return Destination::Skip;
        }

        if (self.today - modified).num_days() > OLD_FILE_AGE_DAYS {
            return Destination::OldFiles;
        }

        if let Some(ext) = Path::new(name).extension()
            && let Some(category) = self.map.category_for_extension(&ext.to_string_lossy())
        {
            return Destination::Category(category);
        }

        Destination::Others
    }
}
