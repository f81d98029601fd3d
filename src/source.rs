// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use crate::TsonError;

/// Reads the full text of a document by path.
pub trait TextLoader {
    fn load(&self, path: &Path) -> Result<String, TsonError>;
}

/// Loads documents from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl TextLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<String, TsonError> {
        fs::read_to_string(path).map_err(|e| TsonError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })
    }
}
