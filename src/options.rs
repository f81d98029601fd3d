use std::path::{Path, PathBuf};

/// Deepest allowed `@` reference chain. Depth 0 is the top-level text.
pub const MAX_REFERENCE_DEPTH: usize = 16;

/// Settings for one top-level load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Base directory every relative `@path` is joined to, for the whole file set.
    pub cwd: PathBuf,
    pub max_depth: usize,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd<P: AsRef<Path>>(mut self, cwd: P) -> Self {
        self.cwd = cwd.as_ref().to_path_buf();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            max_depth: MAX_REFERENCE_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::new();
        assert_eq!(options.cwd, PathBuf::from("."));
        assert_eq!(options.max_depth, 16);
    }

    #[test]
    fn test_builder() {
        let options = Options::new().with_cwd("/etc/app").with_max_depth(4);
        assert_eq!(options.cwd, PathBuf::from("/etc/app"));
        assert_eq!(options.max_depth, 4);
    }
}
