//! downsort - organize a downloads folder into category subdirectories.
//!
//! This library classifies the top-level files of a flat directory by
//! extension and age, then relocates them into category subdirectories
//! (Documents, Images, Audio, Video, Archives, Code, Executables) plus the
//! "Others" and "Old Files" catch-alls, renaming on collision so nothing
//! is ever overwritten.

pub mod cli;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use cli::{
    Cli, OrganizeOptions, OrganizeReport, organize_directory, organize_directory_with_options,
    resolve_target_path, run_cli,
};
pub use file_category::{Category, CategoryMap, Classifier, Destination};
pub use file_organizer::{OrganizeError, OrganizeResult, SafeMover, prepare_directories};
