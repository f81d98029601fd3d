// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use super::MAX_NESTING;
use crate::TsonError;
use crate::ast::{Number, Object, Value};

/// Hook plus the slot holding the first error it (or the nesting check) raised.
pub(super) struct Context<F> {
    hook: F,
    failure: Option<TsonError>,
}

impl<F> Context<F> {
    pub(super) fn new(hook: F) -> Self {
        Self { hook, failure: None }
    }

    pub(super) fn take_failure(&mut self) -> Option<TsonError> {
        self.failure.take()
    }
}

/// Builds a `Value` from any serde data format, intercepting string scalars.
pub(super) struct ValueSeed<'a, F> {
    context: &'a mut Context<F>,
    nesting: usize,
}

impl<'a, F> ValueSeed<'a, F>
where
    F: FnMut(String, usize) -> Result<Value, TsonError>,
{
    pub(super) fn new(context: &'a mut Context<F>, nesting: usize) -> Self {
        Self { context, nesting }
    }

    fn child(&mut self) -> ValueSeed<'_, F> {
        ValueSeed {
            context: &mut *self.context,
            nesting: self.nesting + 1,
        }
    }

    fn fail<E: de::Error>(self, err: TsonError) -> E {
        let marker = E::custom(&err);
        self.context.failure = Some(err);
        marker
    }

    fn intercept<E: de::Error>(self, scalar: String) -> Result<Value, E> {
        match (self.context.hook)(scalar, self.nesting) {
            Ok(value) => Ok(value),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn enter<E: de::Error>(&mut self) -> Result<(), E> {
        if self.nesting < MAX_NESTING {
            return Ok(());
        }
        let err = TsonError::SyntaxError {
            message: format!("Nesting deeper than {} levels", MAX_NESTING),
            line: 0,
            column: 0,
            hint: Some("Nesting is counted across referenced files".into()),
            code: Some(211),
        };
        let marker = E::custom(&err);
        self.context.failure = Some(err);
        Err(marker)
    }
}

impl<'de, F> DeserializeSeed<'de> for ValueSeed<'_, F>
where
    F: FnMut(String, usize) -> Result<Value, TsonError>,
{
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, F> Visitor<'de> for ValueSeed<'_, F>
where
    F: FnMut(String, usize) -> Result<Value, TsonError>,
{
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a TSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(Number::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        self.intercept(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        self.intercept(v)
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.enter::<A::Error>()?;
        let mut arr = Vec::new();
        while let Some(item) = seq.next_element_seed(self.child())? {
            arr.push(item);
        }
        Ok(Value::Array(arr))
    }

    fn visit_map<A>(mut self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        self.enter::<A::Error>()?;
        let mut items = Object::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(self.child())?;
            // last duplicate wins, first position is kept
            items.insert(key, value);
        }
        Ok(Value::Object(items))
    }
}
