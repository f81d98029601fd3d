// Author: Dustin Pilgrim
// License: MIT

use json_comments::CommentSettings;
use serde::de::DeserializeSeed;
use serde_json::error::Category;

use crate::TsonError;
use crate::ast::Value;

mod seed;

use seed::{Context, ValueSeed};

/// Containers nested deeper than this, counted across every referenced
/// document of one load, are rejected instead of exhausting the stack.
/// Kept below serde_json's own per-document limit of 128 so this check fires first.
pub const MAX_NESTING: usize = 100;

/// Parse a complete document as plain JSON (with comments).
pub fn parse_document(text: &str) -> Result<Value, TsonError> {
    parse_document_with(text, 0, |s: String, _nesting: usize| Ok(Value::String(s)))
}

/// Parse a complete document, passing every string scalar in value position
/// through `hook` together with the number of containers enclosing it. The
/// hook's result replaces the scalar. Object keys never reach the hook.
///
/// `nesting` is the container depth the document root sits at; a referenced
/// document starts where the referencing scalar was.
pub fn parse_document_with<F>(text: &str, nesting: usize, hook: F) -> Result<Value, TsonError>
where
    F: FnMut(String, usize) -> Result<Value, TsonError>,
{
    let reader = CommentSettings::c_style().strip_comments(text.as_bytes());
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let mut context = Context::new(hook);

    let parsed = ValueSeed::new(&mut context, nesting)
        .deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value));

    // hook and nesting failures are parked in the context; serde only sees a marker
    parsed.map_err(|e| context.take_failure().unwrap_or_else(|| syntax_error(&e)))
}

fn syntax_error(err: &serde_json::Error) -> TsonError {
    let full = err.to_string();
    let message = full.split(" at line ").next().unwrap_or_default().to_string();

    match err.classify() {
        Category::Eof => TsonError::UnexpectedEof {
            message,
            line: err.line(),
            column: err.column(),
            hint: Some("A document must contain exactly one complete value".into()),
            code: Some(201),
        },
        _ => TsonError::SyntaxError {
            message,
            line: err.line(),
            column: err.column(),
            hint: None,
            code: Some(202),
        },
    }
}
