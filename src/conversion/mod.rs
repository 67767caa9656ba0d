pub mod batch;
pub mod convert;
pub mod format;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::utils::has_image_extension;

pub use batch::{run_batch, BatchSummary};
pub use convert::{convert_image, ConversionResult};
pub use format::{TargetFormat, IMAGE_EXTENSIONS};

/// One batch invocation's worth of configuration, immutable once built.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: TargetFormat,
    pub quality: u8,
    pub recursive: bool,
}

/// Collect all image files under `input_dir` whose extension is on the
/// whitelist.
///
/// Non-recursive mode inspects direct children only; recursive mode walks
/// the full subtree. The result is sorted for a stable processing order.
/// An empty result is not an error; failing to read the root (missing
/// directory, permissions) is.
pub fn discover_images(input_dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let walker = if recursive {
        WalkDir::new(input_dir).follow_links(false)
    } else {
        WalkDir::new(input_dir).follow_links(false).max_depth(1)
    };

    let mut image_files = Vec::new();
    for entry in walker {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() && has_image_extension(path) {
            image_files.push(path.to_path_buf());
        }
    }

    image_files.sort();
    Ok(image_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_discovery_filters_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("a.png"));
        touch(&tmp.path().join("b.JPG"));
        touch(&tmp.path().join("notes.txt"));
        touch(&tmp.path().join("noext"));

        let files = discover_images(tmp.path(), false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG"]);
    }

    #[test]
    fn test_discovery_empty_directory_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discover_images(tmp.path(), true).unwrap().is_empty());
    }

    #[test]
    fn test_recursive_discovery_is_a_superset() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("top.png"));
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("nested.webp"));

        let shallow = discover_images(tmp.path(), false).unwrap();
        let deep = discover_images(tmp.path(), true).unwrap();

        assert_eq!(shallow.len(), 1);
        assert_eq!(deep.len(), 2);
        for file in &shallow {
            assert!(deep.contains(file));
        }
    }

    #[test]
    fn test_discovery_missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        assert!(discover_images(&missing, false).is_err());
    }
}
