/// Directory preparation and collision-safe file relocation.
///
/// This module owns the filesystem side of a run: creating the category
/// subdirectories under the target root and moving files into them without
/// overwriting anything that is already there.
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_category::{CategoryMap, OLD_FILES_DIR, OTHERS_DIR};

/// Errors that can occur while preparing directories or moving files.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target root does not exist.
    RootNotFound { path: PathBuf },
    /// A required path exists but is not a directory (either the target
    /// root itself or a category name occupied by a regular file).
    NotADirectory { path: PathBuf },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read the target root's entries.
    ScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No explicit path was given and the home directory could not be
    /// resolved.
    HomeDirUnavailable,
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "The path {} does not exist!", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "{} exists but is not a directory", path.display())
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(f, "Failed to create directory {}: {}", path.display(), source)
            }
            Self::FileMoveFailed {
                source_path,
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source_path.display(),
                    destination.display(),
                    source
                )
            }
            Self::ScanFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::HomeDirUnavailable => {
                write!(f, "Could not resolve the home directory")
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Ensures every category subdirectory plus the two catch-alls exist under
/// `root`, creating any that are missing.
///
/// Returns the paths that were actually created, so the caller can log
/// them. Re-running against an already prepared root creates nothing and
/// returns an empty list.
///
/// # Errors
///
/// Fails before any mutation if `root` does not exist or is not a
/// directory. Fails with `NotADirectory` if any required subdirectory name
/// is occupied by a non-directory entry, since silently moving files next
/// to it would misplace them; all names are checked before the first
/// directory is created, so a fatal abort leaves the root unchanged.
pub fn prepare_directories(root: &Path, map: &CategoryMap) -> OrganizeResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(OrganizeError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(OrganizeError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let names: Vec<&str> = map
        .categories()
        .map(|category| category.dir_name())
        .chain([OTHERS_DIR, OLD_FILES_DIR])
        .collect();

    // Validate every name first, so a fatal abort leaves the root untouched.
    for name in &names {
        let dir = root.join(name);
        if dir.exists() && !dir.is_dir() {
            return Err(OrganizeError::NotADirectory { path: dir });
        }
    }

    let mut created = Vec::new();
    for name in &names {
        let dir = root.join(name);
        if dir.exists() {
            continue;
        }
        fs::create_dir(&dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: dir.clone(),
            source: e,
        })?;
        created.push(dir);
    }

    Ok(created)
}

/// Moves files into destination directories without overwriting existing
/// entries.
pub struct SafeMover;

impl SafeMover {
    /// Moves `source` into `dest_dir`, keeping its name when possible.
    ///
    /// If the destination name is taken, candidates `<stem>_1<ext>`,
    /// `<stem>_2<ext>`, ... are probed in order and the first free one is
    /// used. The probe has no upper bound; the monotonic counter guarantees
    /// termination on a finite filesystem. A collision is an expected case,
    /// not an error.
    ///
    /// Returns the final destination path on success.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use downsort::file_organizer::SafeMover;
    /// use std::path::Path;
    ///
    /// let moved = SafeMover::move_file(
    ///     Path::new("/downloads/report.pdf"),
    ///     Path::new("/downloads/Documents"),
    /// );
    /// match moved {
    ///     Ok(dest) => println!("now at {}", dest.display()),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn move_file(source: &Path, dest_dir: &Path) -> OrganizeResult<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailed {
                source_path: source.to_path_buf(),
                destination: dest_dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let mut destination = dest_dir.join(file_name);
        if destination.exists() {
            destination = Self::resolve_collision(&destination);
        }

        fs::rename(source, &destination).map_err(|e| OrganizeError::FileMoveFailed {
            source_path: source.to_path_buf(),
            destination: destination.clone(),
            source: e,
        })?;

        Ok(destination)
    }

    /// Finds the first unoccupied variant of `destination` by appending an
    /// incrementing counter between the stem and the extension.
    fn resolve_collision(destination: &Path) -> PathBuf {
        let parent = destination.parent().unwrap_or_else(|| Path::new(""));
        let stem = destination
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = destination
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let mut counter: u64 = 1;
        loop {
            let candidate = parent.join(format!("{}_{}{}", stem, counter, ext));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_all_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        let created =
            prepare_directories(root, &CategoryMap::default()).expect("Failed to prepare");
        assert_eq!(created.len(), 9);

        for name in [
            "Documents",
            "Images",
            "Audio",
            "Video",
            "Archives",
            "Code",
            "Executables",
            "Others",
            "Old Files",
        ] {
            assert!(root.join(name).is_dir(), "missing {}", name);
        }
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let map = CategoryMap::default();

        let first = prepare_directories(root, &map).expect("First prepare failed");
        assert_eq!(first.len(), 9);

        let second = prepare_directories(root, &map).expect("Second prepare failed");
        assert!(second.is_empty());
    }

    #[test]
    fn test_prepare_missing_root_fails() {
        let result = prepare_directories(Path::new("/non/existent/root"), &CategoryMap::default());
        assert!(matches!(result, Err(OrganizeError::RootNotFound { .. })));
    }

    #[test]
    fn test_prepare_rejects_category_name_taken_by_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("Documents"), b"not a directory").expect("Failed to write file");

        let result = prepare_directories(root, &CategoryMap::default());
        assert!(matches!(result, Err(OrganizeError::NotADirectory { .. })));
    }

    #[test]
    fn test_prepare_creates_nothing_when_a_later_name_is_taken_by_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        // "Executables" is validated after "Documents" in table order.
        fs::write(root.join("Executables"), b"not a directory").expect("Failed to write file");

        let result = prepare_directories(root, &CategoryMap::default());
        assert!(matches!(result, Err(OrganizeError::NotADirectory { .. })));
        assert!(!root.join("Documents").exists());
        assert!(!root.join("Others").exists());
        assert!(!root.join("Old Files").exists());
    }

    #[test]
    fn test_move_file_keeps_name_without_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let dest_dir = root.join("Documents");
        fs::create_dir(&dest_dir).expect("Failed to create destination");

        let source = root.join("notes.txt");
        fs::write(&source, b"notes").expect("Failed to write source");

        let final_path = SafeMover::move_file(&source, &dest_dir).expect("Move failed");
        assert_eq!(final_path, dest_dir.join("notes.txt"));
        assert!(final_path.exists());
        assert!(!source.exists());
    }

    #[test]
    fn test_move_file_renames_on_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let dest_dir = root.join("Documents");
        fs::create_dir(&dest_dir).expect("Failed to create destination");
        fs::write(dest_dir.join("notes.txt"), b"existing").expect("Failed to write existing");

        let source = root.join("notes.txt");
        fs::write(&source, b"incoming").expect("Failed to write source");

        let final_path = SafeMover::move_file(&source, &dest_dir).expect("Move failed");
        assert_eq!(final_path, dest_dir.join("notes_1.txt"));
        assert!(dest_dir.join("notes.txt").exists());
        assert!(dest_dir.join("notes_1.txt").exists());
    }

    #[test]
    fn test_move_file_counter_advances_past_taken_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let dest_dir = root.join("Documents");
        fs::create_dir(&dest_dir).expect("Failed to create destination");
        fs::write(dest_dir.join("notes.txt"), b"first").expect("Failed to write");
        fs::write(dest_dir.join("notes_1.txt"), b"second").expect("Failed to write");

        let source = root.join("notes.txt");
        fs::write(&source, b"third").expect("Failed to write source");

        let final_path = SafeMover::move_file(&source, &dest_dir).expect("Move failed");
        assert_eq!(final_path, dest_dir.join("notes_2.txt"));
    }

    #[test]
    fn test_move_file_collision_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let dest_dir = root.join("Others");
        fs::create_dir(&dest_dir).expect("Failed to create destination");
        fs::write(dest_dir.join("README"), b"existing").expect("Failed to write existing");

        let source = root.join("README");
        fs::write(&source, b"incoming").expect("Failed to write source");

        let final_path = SafeMover::move_file(&source, &dest_dir).expect("Move failed");
        assert_eq!(final_path, dest_dir.join("README_1"));
    }

    #[test]
    fn test_move_file_missing_source_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let dest_dir = root.join("Documents");
        fs::create_dir(&dest_dir).expect("Failed to create destination");

        let result = SafeMover::move_file(&root.join("ghost.txt"), &dest_dir);
        assert!(matches!(result, Err(OrganizeError::FileMoveFailed { .. })));
    }
}
