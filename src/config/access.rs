use super::*;

impl TsonConfig {
    /// Get a typed value from the configuration using dot notation.
    ///
    /// Numeric segments index into arrays: `servers.0.host`.
    ///
    /// # Examples
    /// ```no_run
    /// # use tson::TsonConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = TsonConfig::from_file("config.tson")?;
    /// let host: String = config.get("server.host")?;
    /// let port: u16 = config.get("server.port")?;
    /// let debug: bool = config.get("debug")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if path doesn't exist or value can't be converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, TsonError>
    where
        T: TryFrom<Value, Error = TsonError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value.clone()).map_err(|e| match e {
            TsonError::TypeError { message, hint, code } => TsonError::TypeError {
                message: format!("{} at '{}'", message, path),
                hint,
                code,
            },
            other => other,
        })
    }

    /// Get an optional typed value - returns `None` if the path doesn't exist
    /// or holds `null`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, TsonError>
    where
        T: TryFrom<Value, Error = TsonError>,
    {
        match self.get_value(path) {
            Ok(Value::Null) => Ok(None),
            Ok(_) => self.get(path).map(Some),
            Err(TsonError::MissingKey { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = TsonError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value`. The empty path returns the root.
    pub fn get_value(&self, path: &str) -> Result<&Value, TsonError> {
        let path = path.trim();
        if path.is_empty() {
            return Ok(&self.root);
        }

        let mut current = &self.root;
        for segment in path.split('.') {
            let next = match current {
                Value::Object(items) => items.get(segment),
                Value::Array(elements) => segment.parse::<usize>().ok().and_then(|i| elements.get(i)),
                _ => None,
            };
            current = next.ok_or_else(|| TsonError::MissingKey {
                path: path.to_string(),
                hint: Some(format!("No entry '{}' under a {}", segment, current.type_name())),
                code: Some(304),
            })?;
        }
        Ok(current)
    }

    /// Get all keys of the object at `path`, in document order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, TsonError> {
        match self.get_value(path)? {
            Value::Object(items) => Ok(items.keys().cloned().collect()),
            other => Err(TsonError::type_error(
                format!("Path '{}' is a {}, not an object", path, other.type_name()),
                Some("Only objects have keys"),
                306,
            )),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }
}
