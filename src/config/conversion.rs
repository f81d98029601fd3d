// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::ast::{Number, Value};
use crate::TsonError;

impl TryFrom<Value> for String {
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(TsonError::type_error(
                format!("Expected string, got {}", other.type_name()),
                Some("Use a string value in your config"),
                401,
            )),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(TsonError::type_error(
                format!("Expected boolean, got {}", other.type_name()),
                Some("Use true or false"),
                403,
            )),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(TsonError::type_error(
                format!("Expected number, got {}", other.type_name()),
                Some("Use a number value in your config"),
                402,
            )),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = f64::try_from(value)?;
        if n.is_finite() && n.abs() > f32::MAX as f64 {
            return Err(TsonError::type_error(
                format!("Number {} out of range for f32", n),
                Some("Use f64 for numbers beyond the f32 range"),
                407,
            ));
        }
        Ok(n as f32)
    }
}

/// Integer conversions reject fractions and values outside the target range.
macro_rules! integer_conversion {
    ($($ty:ty),*) => {$(
        impl TryFrom<Value> for $ty {
            type Error = TsonError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                let n = match value {
                    Value::Number(n) => n,
                    other => {
                        return Err(TsonError::type_error(
                            format!("Expected number, got {}", other.type_name()),
                            Some("Use a number value in your config"),
                            402,
                        ));
                    }
                };
                let out_of_range = || TsonError::type_error(
                    format!("Number {} out of range for {}", display_number(n), stringify!($ty)),
                    Some(concat!("Use a whole number that fits in ", stringify!($ty))),
                    407,
                );
                match n {
                    Number::Int(i) => <$ty>::try_from(i).map_err(|_| out_of_range()),
                    Number::UInt(u) => <$ty>::try_from(u).map_err(|_| out_of_range()),
                    Number::Float(f) if f.fract() == 0.0 && f >= <$ty>::MIN as f64 && f <= <$ty>::MAX as f64 => {
                        Ok(f as $ty)
                    }
                    Number::Float(_) => Err(out_of_range()),
                }
            }
        }
    )*};
}

integer_conversion!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

fn display_number(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::UInt(u) => u.to_string(),
        Number::Float(f) => f.to_string(),
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = TsonError>,
{
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(arr) => arr.into_iter().map(T::try_from).collect(),
            other => Err(TsonError::type_error(
                format!("Expected array, got {}", other.type_name()),
                Some("Use an array [...] in your config"),
                405,
            )),
        }
    }
}

impl<T> TryFrom<Value> for HashMap<String, T>
where
    T: TryFrom<Value, Error = TsonError>,
{
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => items
                .into_iter()
                .map(|(key, val)| T::try_from(val).map(|v| (key, v)))
                .collect(),
            other => Err(TsonError::type_error(
                format!("Expected object, got {}", other.type_name()),
                Some("Use an object {...} in your config"),
                406,
            )),
        }
    }
}

/// Fails on NaN and infinities, which JSON cannot represent.
impl TryFrom<Value> for serde_json::Value {
    type Error = TsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(Number::Int(i)) => serde_json::Value::from(i),
            Value::Number(Number::UInt(u)) => serde_json::Value::from(u),
            Value::Number(Number::Float(f)) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    TsonError::type_error(
                        format!("Cannot represent {} as a JSON number", f),
                        Some("Only finite numbers convert to JSON"),
                        421,
                    )
                })?,
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => serde_json::Value::Array(
                arr.into_iter().map(serde_json::Value::try_from).collect::<Result<_, _>>()?,
            ),
            Value::Object(items) => serde_json::Value::Object(
                items
                    .into_iter()
                    .map(|(k, v)| serde_json::Value::try_from(v).map(|v| (k, v)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Number(Number::Int(i)),
                (None, Some(u)) => Value::Number(Number::UInt(u)),
                (None, None) => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(items) => {
                Value::Object(items.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Deserialize a resolved value into any `serde` type.
///
/// # Example
/// ```no_run
/// #[derive(serde::Deserialize)]
/// struct Server { host: String, port: u16 }
///
/// let value = tson::from_file("server.tson")?;
/// let server: Server = tson::from_value(value)?;
/// # Ok::<(), tson::TsonError>(())
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, TsonError> {
    let json = serde_json::Value::try_from(value)?;
    serde_json::from_value(json).map_err(|e| {
        TsonError::type_error(
            format!("Failed to deserialize: {}", e),
            Some("Check that the document matches the target type"),
            420,
        )
    })
}
