use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::startup_checks::StartupCheckError;

/// Extensions picked up from the input directory, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg"];

pub fn is_image(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// List the image files directly inside `input_dir`, sorted by file name.
///
/// Only a failure to read `input_dir` itself is an error. An unreadable entry
/// with an image name (a dangling symlink, say) is still listed so that it
/// fails on its own when processed; other unreadable entries are skipped.
pub fn list_images(input_dir: &Path) -> Result<Vec<PathBuf>, StartupCheckError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1) // Only immediate children
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(StartupCheckError::ReadDirFailed(e)),
            Err(e) => {
                warn!("Unreadable directory entry: {}", e);
                if let Some(path) = e.path()
                    && path
                        .file_name()
                        .is_some_and(|name| is_image(&name.to_string_lossy()))
                {
                    images.push(path.to_path_buf());
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if is_image(&file_name) {
            images.push(entry.into_path());
        } else {
            debug!("Skipping non-image file: {}", file_name);
        }
    }

    debug!("Found {} images in {:?}", images.len(), input_dir);
    Ok(images)
}
