// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::ast::Value;
use crate::options::Options;
use crate::parser;
use crate::source::TextLoader;
use crate::TsonError;

/// Marks a string scalar as a file reference: `"@path/to/file.tson"`.
pub const REFERENCE_PREFIX: char = '@';

/// Resolved documents keyed by reference path exactly as written.
///
/// Lives for one top-level load. Entries are the canonical copies; every
/// substitution site receives its own clone.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    entries: HashMap<String, Value>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn insert(&mut self, path: String, value: Value) {
        self.entries.insert(path, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Parses TSON text and substitutes every `"@path"` scalar with the parsed
/// contents of `cwd/path`, recursively. Spreads (`"*"`) are left untouched.
pub struct Resolver<'a> {
    loader: &'a dyn TextLoader,
    options: &'a Options,
    cache: ReferenceCache,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a dyn TextLoader, options: &'a Options) -> Self {
        Self {
            loader,
            options,
            cache: ReferenceCache::new(),
        }
    }

    /// Resolve `text` found `depth` reference hops below the top-level document.
    pub fn resolve(&mut self, text: &str, depth: usize) -> Result<Value, TsonError> {
        self.resolve_nested(text, depth, 0)
    }

    /// Like [`resolve`](Self::resolve), with the document root sitting inside
    /// `nesting` containers of the documents that referenced it.
    pub fn resolve_nested(&mut self, text: &str, depth: usize, nesting: usize) -> Result<Value, TsonError> {
        if depth > self.options.max_depth {
            return Err(TsonError::RecursionError {
                message: format!(
                    "Max reference depth exceeded: depth {} is above the limit of {}",
                    depth, self.options.max_depth
                ),
                depth,
                hint: Some("Check for files that reference each other in a cycle".into()),
                code: Some(320),
            });
        }

        parser::parse_document_with(text, nesting, |scalar: String, nesting: usize| {
            self.substitute(scalar, depth, nesting)
        })
    }

    pub fn cache(&self) -> &ReferenceCache {
        &self.cache
    }

    pub fn into_cache(self) -> ReferenceCache {
        self.cache
    }

    fn substitute(&mut self, scalar: String, depth: usize, nesting: usize) -> Result<Value, TsonError> {
        if !scalar.starts_with(REFERENCE_PREFIX) {
            return Ok(Value::String(scalar));
        }
        let path = &scalar[REFERENCE_PREFIX.len_utf8()..];

        if let Some(hit) = self.cache.get(path) {
            trace!(reference = path, "reference cache hit");
            return Ok(hit.clone());
        }

        let full_path = self.options.cwd.join(path);
        debug!(path = %full_path.display(), depth = depth + 1, "loading reference");

        let text = self.loader.load(&full_path)?;
        let resolved = self.resolve_nested(&text, depth + 1, nesting)?;
        self.cache.insert(path.to_string(), resolved.clone());
        Ok(resolved)
    }
}

// -- Tests --
