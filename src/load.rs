// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tracing::debug;

use crate::ast::Value;
use crate::options::Options;
use crate::resolver::Resolver;
use crate::source::{FsLoader, TextLoader};
use crate::unpack::unpack;
use crate::TsonError;

/// Parse TSON text, resolving references against the current directory.
///
/// # Example
/// ```no_run
/// let value = tson::from_text(r#"{"name": "app", "*": "@defaults.tson"}"#)?;
/// # Ok::<(), tson::TsonError>(())
/// ```
pub fn from_text(text: &str) -> Result<Value, TsonError> {
    from_text_with(text, &Options::default(), &FsLoader)
}

/// Parse TSON text, resolving references against `cwd`.
pub fn from_text_in<P: AsRef<Path>>(text: &str, cwd: P) -> Result<Value, TsonError> {
    from_text_with(text, &Options::new().with_cwd(cwd), &FsLoader)
}

/// Read and parse a TSON file, resolving references against the current directory.
///
/// References are joined to the working directory, not to the directory of
/// the file that contains them.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Value, TsonError> {
    from_file_with(path, &Options::default(), &FsLoader)
}

/// Read and parse a TSON file, resolving references against `cwd`.
pub fn from_file_in<P: AsRef<Path>, Q: AsRef<Path>>(path: P, cwd: Q) -> Result<Value, TsonError> {
    from_file_with(path, &Options::new().with_cwd(cwd), &FsLoader)
}

/// Resolve all references in `text`, then unpack every `"*"` key.
pub fn from_text_with(text: &str, options: &Options, loader: &dyn TextLoader) -> Result<Value, TsonError> {
    let mut resolver = Resolver::new(loader, options);
    let mut value = resolver.resolve(text, 0)?;
    unpack(&mut value)?;
    Ok(value)
}

pub fn from_file_with<P: AsRef<Path>>(
    path: P,
    options: &Options,
    loader: &dyn TextLoader,
) -> Result<Value, TsonError> {
    let path = path.as_ref();
    debug!(path = %path.display(), cwd = %options.cwd.display(), "loading document");
    let text = loader.load(path)?;
    from_text_with(&text, options, loader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_plain_json_invariance() {
        let inputs = [
            r#"{"a": [1, 2.5, "s", true, null], "b": {"c": {}}}"#,
            r#"{"big": 18446744073709551615, "min": -9223372036854775808, "max": 9223372036854775807}"#,
            r#"{"exp": [1e3, -2.5E-3, 6.02e+23, 0.0, -0]}"#,
            r#"{"esc": "tab\there \"quoted\" \\ \/ \u00e9 \ud83d\ude00", "at": "mail@example.com"}"#,
            r#"[[], {}, [[{"deep": [null]}]]]"#,
            r#""@ is only a reference at the start""#,
        ];
        for input in inputs {
            let expected = Value::from(serde_json::from_str::<serde_json::Value>(input).unwrap());
            assert_eq!(from_text(input).unwrap(), expected, "document: {}", input);
        }
    }

    #[test]
    fn test_from_file_substitutes_reference() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a", r#"{"x": "@b"}"#);
        write(dir.path(), "b", r#"{"y": 1}"#);

        let value = from_file_in(dir.path().join("a"), dir.path()).unwrap();
        let expected = from_text(r#"{"x": {"y": 1}}"#).unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_referenced_spread_is_unpacked() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "defaults.tson", r#"{"host": "localhost", "port": 80}"#);

        let value = from_text_in(r#"{"port": 8080, "*": "@defaults.tson"}"#, dir.path()).unwrap();
        assert_eq!(value, from_text(r#"{"port": 8080, "host": "localhost"}"#).unwrap());
    }

    #[test]
    fn test_shared_reference_unpacked_independently() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "base.tson", r#"{"*": {"kind": "base"}, "n": 1}"#);

        let value = from_text_in(
            r#"{"a": {"kind": "custom", "*": "@base.tson"}, "b": {"*": "@base.tson"}}"#,
            dir.path(),
        )
        .unwrap();

        assert_eq!(value.get("a").and_then(|a| a.get("kind")).and_then(Value::as_str), Some("custom"));
        assert_eq!(value.get("b").and_then(|b| b.get("kind")).and_then(Value::as_str), Some("base"));
        assert_eq!(value.get("b").and_then(|b| b.get("n")).and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_nested_directories_resolve_against_cwd() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "conf/main.tson", r#"{"db": "@conf/db.tson"}"#);
        write(dir.path(), "conf/db.tson", r#"{"creds": "@secrets/db.tson"}"#);
        write(dir.path(), "secrets/db.tson", r#"{"user": "admin"}"#);

        let value = from_file_in(dir.path().join("conf/main.tson"), dir.path()).unwrap();
        let user = value
            .get("db")
            .and_then(|db| db.get("creds"))
            .and_then(|c| c.get("user"))
            .and_then(Value::as_str);
        assert_eq!(user, Some("admin"));
    }

    #[test]
    fn test_missing_top_level_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = from_file_in(dir.path().join("nope.tson"), dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(from_text("{").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(from_text(r#"{"*": "not-an-object"}"#).unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_self_reference_is_recursion_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "loop.tson", r#"{"again": "@loop.tson"}"#);

        let err = from_file_in(dir.path().join("loop.tson"), dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Recursion);
    }
}
