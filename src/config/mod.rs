// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::ast::Value;
use crate::load;
use crate::options::Options;
use crate::source::FsLoader;
use crate::TsonError;

mod access;
mod conversion;

pub use conversion::from_value;

/// A fully resolved and unpacked TSON document with typed, path-based access.
#[derive(Debug, Clone, PartialEq)]
pub struct TsonConfig {
    root: Value,
    source: Option<PathBuf>,
}

impl TsonConfig {
    /// Load a TSON file, resolving `@` references against the current directory.
    ///
    /// # Example
    /// ```no_run
    /// # use tson::TsonConfig;
    /// let config = TsonConfig::from_file("config.tson")?;
    /// let port: u16 = config.get("server.port")?;
    /// # Ok::<(), tson::TsonError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TsonError> {
        Self::from_file_with_options(path, &Options::default())
    }

    /// Load a TSON file, resolving `@` references against `base_dir`.
    ///
    /// Every reference in the whole file set is joined to `base_dir`, including
    /// references found inside referenced files.
    pub fn from_file_with_base<P: AsRef<Path>, Q: AsRef<Path>>(path: P, base_dir: Q) -> Result<Self, TsonError> {
        Self::from_file_with_options(path, &Options::new().with_cwd(base_dir))
    }

    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: &Options) -> Result<Self, TsonError> {
        let path = path.as_ref();
        let root = load::from_file_with(path, options, &FsLoader)?;
        Ok(Self {
            root,
            source: Some(path.to_path_buf()),
        })
    }

    /// Parse TSON from a string; references resolve against the current directory.
    pub fn from_str(content: &str) -> Result<Self, TsonError> {
        Self::from_str_with_base(content, ".")
    }

    pub fn from_str_with_base<P: AsRef<Path>>(content: &str, base_dir: P) -> Result<Self, TsonError> {
        let root = load::from_text_in(content, base_dir)?;
        Ok(Self { root, source: None })
    }

    /// Wrap an already resolved value. No reference resolution or unpacking is done.
    pub fn from_value(root: Value) -> Self {
        Self { root, source: None }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// The file this config was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Deserialize the whole document into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, TsonError> {
        from_value(self.root.clone())
    }
}
