//! Request descriptions fed into the token builders
//!
//! [`JwtRequestContext`] carries the `{method, host, path}` triple that becomes the `uris`
//! claim. [`RequestBody`] models a JSON-like request body while keeping the difference
//! between a field that was never provided ([`Field::Missing`]) and a field explicitly set
//! to `null` ([`BodyValue::Null`]), which decides whether a wallet token carries `reqHash`.

use crate::{CdpAuthError, Result};
use ethereum_types::U256;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// Method, host and path of the request a bearer token authorizes
///
/// Either all three are present (REST) or all are absent (websocket/session token).
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JwtRequestContext {
    pub method: Option<String>,
    pub host: Option<String>,
    pub path: Option<String>,
}

impl JwtRequestContext {
    /// Context for a REST request
    pub fn rest(
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            method: Some(method.into()),
            host: Some(host.into()),
            path: Some(path.into()),
        }
    }

    /// Context for a websocket connection token (no `uris` claim)
    pub fn websocket() -> Self {
        Self::default()
    }

    /// Context from optional parts, validated later by [`JwtRequestContext::uri`]
    pub fn from_parts(method: Option<String>, host: Option<String>, path: Option<String>) -> Self {
        Self { method, host, path }
    }

    /// Check if no request detail is present
    pub fn is_websocket(&self) -> bool {
        [&self.method, &self.host, &self.path]
            .iter()
            .all(|part| present(part).is_none())
    }

    /// Validate presence and return the `uris` entry, `None` for websocket tokens
    pub fn uri(&self) -> Result<Option<String>> {
        match (
            present(&self.method),
            present(&self.host),
            present(&self.path),
        ) {
            (Some(method), Some(host), Some(path)) => Ok(Some(format_uri(method, host, path))),
            (None, None, None) => Ok(None),
            _ => Err(CdpAuthError::InconsistentRequestContext),
        }
    }
}

fn present(part: &Option<String>) -> Option<&str> {
    part.as_deref().filter(|value| !value.is_empty())
}

/// Format a `uris` claim entry as `"<METHOD> <HOST><PATH>"`
pub fn format_uri(method: &str, host: &str, path: &str) -> String {
    format!("{} {}{}", method, host, path)
}

/// Arbitrary-precision number carried in a request body
///
/// Always rendered as a decimal string when hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigNumber {
    Integer(U256),
    Decimal(Decimal),
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigNumber::Integer(value) => write!(f, "{}", value),
            BigNumber::Decimal(value) => write!(f, "{}", value),
        }
    }
}

/// A value inside a request body
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    BigNumber(BigNumber),
    Array(Vec<BodyValue>),
    Object(RequestBody),
}

/// A mapping entry: either never provided or set to a value (possibly `null`)
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Missing,
    Value(BodyValue),
}

impl Field {
    /// Check if the field carries a value, including an explicit `null`
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    /// Get the value, if provided
    pub fn value(&self) -> Option<&BodyValue> {
        match self {
            Field::Missing => None,
            Field::Value(value) => Some(value),
        }
    }
}

/// A request body mapping, keeping insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    fields: Vec<(String, Field)>,
}

impl RequestBody {
    /// Create an empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a value
    pub fn field(mut self, key: impl Into<String>, value: impl Into<BodyValue>) -> Self {
        self.insert(key, Field::Value(value.into()));
        self
    }

    /// Set a field to an explicit `null`
    pub fn null(mut self, key: impl Into<String>) -> Self {
        self.insert(key, Field::Value(BodyValue::Null));
        self
    }

    /// Declare a field that was not provided
    pub fn missing(mut self, key: impl Into<String>) -> Self {
        self.insert(key, Field::Missing);
        self
    }

    /// Insert or replace a field
    pub fn insert(&mut self, key: impl Into<String>, field: Field) {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = field,
            None => self.fields.push((key, field)),
        }
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, field)| field)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check if at least one field carries a value
    ///
    /// Explicit `null`, `""`, `0` and `false` count; [`Field::Missing`] does not.
    pub fn has_meaningful_entries(&self) -> bool {
        self.fields.iter().any(|(_, field)| field.is_present())
    }

    /// Build a body from a JSON object
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (key, Field::Value(BodyValue::from(value))))
                    .collect(),
            }),
            other => Err(CdpAuthError::invalid_request(format!(
                "request body must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Build a body from any serializable request type
    ///
    /// Fields skipped during serialization are simply absent; `None` fields serialized
    /// as `null` are kept as explicit nulls.
    pub fn from_serializable<T: Serialize>(body: &T) -> Result<Self> {
        Self::from_json(serde_json::to_value(body)?)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Value> for BodyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => BodyValue::Null,
            Value::Bool(flag) => BodyValue::Bool(flag),
            Value::Number(number) => BodyValue::Number(number),
            Value::String(text) => BodyValue::String(text),
            Value::Array(items) => {
                BodyValue::Array(items.into_iter().map(BodyValue::from).collect())
            }
            Value::Object(map) => BodyValue::Object(RequestBody {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (key, Field::Value(BodyValue::from(value))))
                    .collect(),
            }),
        }
    }
}

impl From<bool> for BodyValue {
    fn from(value: bool) -> Self {
        BodyValue::Bool(value)
    }
}

impl From<&str> for BodyValue {
    fn from(value: &str) -> Self {
        BodyValue::String(value.to_string())
    }
}

impl From<String> for BodyValue {
    fn from(value: String) -> Self {
        BodyValue::String(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BodyValue {
                fn from(value: $ty) -> Self {
                    BodyValue::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl From<f64> for BodyValue {
    /// Non-finite floats have no JSON form and become `null`
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(BodyValue::Number)
            .unwrap_or(BodyValue::Null)
    }
}

impl From<U256> for BodyValue {
    fn from(value: U256) -> Self {
        BodyValue::BigNumber(BigNumber::Integer(value))
    }
}

impl From<Decimal> for BodyValue {
    fn from(value: Decimal) -> Self {
        BodyValue::BigNumber(BigNumber::Decimal(value))
    }
}

impl From<BigNumber> for BodyValue {
    fn from(value: BigNumber) -> Self {
        BodyValue::BigNumber(value)
    }
}

impl From<Vec<BodyValue>> for BodyValue {
    fn from(value: Vec<BodyValue>) -> Self {
        BodyValue::Array(value)
    }
}

impl From<RequestBody> for BodyValue {
    fn from(value: RequestBody) -> Self {
        BodyValue::Object(value)
    }
}
