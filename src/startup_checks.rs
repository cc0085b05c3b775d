use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Input directory does not exist: {0}")]
    InputDirectoryMissing(PathBuf),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to create output directory: {0}")]
    OutputDirectoryCreationFailed(#[source] std::io::Error),

    #[error("Failed to read input directory: {0}")]
    ReadDirFailed(#[source] walkdir::Error),
}

impl StartupCheckError {
    /// True when the input path itself was rejected, before anything touched the disk.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StartupCheckError::InputDirectoryMissing(_) | StartupCheckError::NotADirectory(_)
        )
    }
}

pub fn validate_input_directory(input_dir: &Path) -> Result<(), StartupCheckError> {
    if !input_dir.exists() {
        error!("Input directory does not exist: {:?}", input_dir);
        return Err(StartupCheckError::InputDirectoryMissing(
            input_dir.to_path_buf(),
        ));
    }

    if !input_dir.is_dir() {
        error!("Input path is not a directory: {:?}", input_dir);
        return Err(StartupCheckError::NotADirectory(input_dir.to_path_buf()));
    }

    debug!("Input directory exists: {:?}", input_dir);
    Ok(())
}

/// Create the output directory and any missing parents.
pub fn ensure_output_directory(output_dir: &Path) -> Result<(), StartupCheckError> {
    if output_dir.is_dir() {
        debug!("Output directory exists: {:?}", output_dir);
        return Ok(());
    }

    info!("Output directory does not exist, creating: {:?}", output_dir);
    std::fs::create_dir_all(output_dir).map_err(|e| {
        error!("Failed to create output directory {:?}: {}", output_dir, e);
        StartupCheckError::OutputDirectoryCreationFailed(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = validate_input_directory(&missing).unwrap_err();
        assert!(matches!(err, StartupCheckError::InputDirectoryMissing(_)));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_validate_file_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("photo.png");
        std::fs::write(&file, b"not a directory").unwrap();

        let err = validate_input_directory(&file).unwrap_err();
        assert!(matches!(err, StartupCheckError::NotADirectory(_)));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_validate_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_input_directory(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_ensure_output_directory_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("out");

        ensure_output_directory(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op on an existing directory
        ensure_output_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_output_directory_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("out");
        std::fs::write(&blocker, b"file in the way").unwrap();

        let err = ensure_output_directory(&blocker).unwrap_err();
        assert!(matches!(
            err,
            StartupCheckError::OutputDirectoryCreationFailed(_)
        ));
        assert!(!err.is_invalid_input());
    }
}
