//! Tolerant JSON decoding for Miro entities.
//!
//! The Miro API is not consistent about key casing and sends `null` for
//! nested objects it has no value for. Entities therefore never go through a
//! strict serde derive. Each one declares a table of [`Field`]s and the shared
//! routine in this module parses the body into a generic map, matches keys
//! case-insensitively against the table and fills the typed slots.
//!
//! # Example
//!
//! ```
//! use miroapi::decode::{Decode, Field};
//!
//! #[derive(Debug, Default)]
//! struct Sticker {
//!     id: String,
//!     text: String,
//! }
//!
//! impl Decode for Sticker {
//!     const ENTITY: &'static str = "sticker";
//!     const FIELDS: &'static [Field<Self>] = &[
//!         Field::string("id", |s| &mut s.id),
//!         Field::string("text", |s| &mut s.text),
//!     ];
//! }
//!
//! let sticker = Sticker::from_slice(br#"{"ID": "1", "Text": "hi", "x": 3}"#).unwrap();
//! assert_eq!(sticker.id, "1");
//! assert_eq!(sticker.text, "hi");
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// A raw JSON object as produced by the first decoding pass.
pub type Object = Map<String, Value>;

/// How a recognized field is turned into its typed slot.
pub enum FieldKind<T> {
    /// A JSON string.
    String(fn(&mut T) -> &mut String),
    /// A JSON integer (whole-valued floats are accepted).
    Integer(fn(&mut T) -> &mut i64),
    /// An RFC 3339 timestamp string.
    Timestamp(fn(&mut T) -> &mut Option<DateTime<Utc>>),
    /// An array of JSON strings.
    Strings(fn(&mut T) -> &mut Vec<String>),
    /// A nested object decoded with its own field table.
    Entity(fn(&mut T, &Object) -> Result<(), DecodeError>),
    /// An array of nested objects.
    Entities(fn(&mut T, &[Value]) -> Result<(), DecodeError>),
}

impl<T> FieldKind<T> {
    fn expected(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Timestamp(_) => "timestamp string",
            Self::Strings(_) => "array of strings",
            Self::Entity(_) => "object",
            Self::Entities(_) => "array of objects",
        }
    }
}

/// One entry of an entity's field table.
///
/// `name` is the lower-cased wire name; keys in the payload are lower-cased
/// before they are compared against it.
pub struct Field<T> {
    name: &'static str,
    kind: FieldKind<T>,
}

impl<T> Field<T> {
    pub const fn string(name: &'static str, slot: fn(&mut T) -> &mut String) -> Self {
        Self {
            name,
            kind: FieldKind::String(slot),
        }
    }

    pub const fn integer(name: &'static str, slot: fn(&mut T) -> &mut i64) -> Self {
        Self {
            name,
            kind: FieldKind::Integer(slot),
        }
    }

    pub const fn timestamp(
        name: &'static str,
        slot: fn(&mut T) -> &mut Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Timestamp(slot),
        }
    }

    pub const fn strings(name: &'static str, slot: fn(&mut T) -> &mut Vec<String>) -> Self {
        Self {
            name,
            kind: FieldKind::Strings(slot),
        }
    }

    /// A nested entity. `set` is usually `|e, o| set_entity(&mut e.field, o)`.
    pub const fn entity(
        name: &'static str,
        set: fn(&mut T, &Object) -> Result<(), DecodeError>,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Entity(set),
        }
    }

    /// An array of nested entities. `set` is usually
    /// `|e, items| set_entities(&mut e.field, items)`.
    pub const fn entities(
        name: &'static str,
        set: fn(&mut T, &[Value]) -> Result<(), DecodeError>,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Entities(set),
        }
    }

    /// The lower-cased wire name of this field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, target: &mut T, value: &Value) -> Result<(), DecodeError> {
        match (&self.kind, value) {
            // A null leaves the slot at its default, which is `None` for
            // nested entities and timestamps.
            (_, Value::Null) => Ok(()),
            (FieldKind::String(slot), Value::String(s)) => {
                s.clone_into(slot(target));
                Ok(())
            }
            (FieldKind::Integer(slot), value) => {
                *slot(target) = integer(value)?;
                Ok(())
            }
            (FieldKind::Timestamp(slot), Value::String(s)) => {
                *slot(target) = Some(timestamp(s)?);
                Ok(())
            }
            (FieldKind::Strings(slot), Value::Array(items)) => {
                *slot(target) = strings(items)?;
                Ok(())
            }
            (FieldKind::Entity(set), Value::Object(object)) => set(target, object),
            (FieldKind::Entities(set), Value::Array(items)) => set(target, items),
            (kind, other) => Err(DecodeError::mismatch(kind.expected(), other)),
        }
    }
}

/// An entity that can be decoded by the tolerant decoder.
pub trait Decode: Default + Sized + 'static {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// The recognized fields of this entity.
    const FIELDS: &'static [Field<Self>];

    /// Decode from an already parsed JSON object.
    fn from_object(object: &Object) -> Result<Self, DecodeError> {
        decode_object(object).map_err(|e| e.in_entity(Self::ENTITY))
    }

    /// Decode from an untyped JSON value, which must be an object.
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(DecodeError::mismatch("object", other).in_entity(Self::ENTITY)),
        }
    }

    /// Decode from a raw response body.
    fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value = parse(bytes).map_err(|e| e.in_entity(Self::ENTITY))?;
        Self::from_value(&value)
    }
}

/// Decode a body whose top level is a JSON array of `T`.
pub fn list_from_slice<T: Decode>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    let value = parse(bytes).map_err(|e| e.in_entity(T::ENTITY))?;
    match &value {
        Value::Array(items) => decode_array(items).map_err(|e| e.in_entity(T::ENTITY)),
        other => Err(DecodeError::mismatch("array of objects", other).in_entity(T::ENTITY)),
    }
}

/// Store a decoded nested entity into an optional slot.
pub fn set_entity<E: Decode>(slot: &mut Option<E>, object: &Object) -> Result<(), DecodeError> {
    *slot = Some(decode_object(object)?);
    Ok(())
}

/// Store decoded array elements into a vector slot.
pub fn set_entities<E: Decode>(slot: &mut Vec<E>, items: &[Value]) -> Result<(), DecodeError> {
    *slot = decode_array(items)?;
    Ok(())
}

fn parse(bytes: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError::new(DecodeErrorKind::Syntax(e)))
}

fn decode_object<T: Decode>(object: &Object) -> Result<T, DecodeError> {
    let mut entity = T::default();
    let mut seen = vec![false; T::FIELDS.len()];

    for (key, value) in object {
        let key = key.to_lowercase();
        let Some(index) = T::FIELDS.iter().position(|f| f.name == key) else {
            continue;
        };
        // The first key that maps onto a field wins.
        if std::mem::replace(&mut seen[index], true) {
            continue;
        }
        let field = &T::FIELDS[index];
        field
            .apply(&mut entity, value)
            .map_err(|e| e.at(field.name))?;
    }

    Ok(entity)
}

fn decode_array<T: Decode>(items: &[Value]) -> Result<Vec<T>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(object) => decode_object(object).map_err(|e| e.at_index(i)),
            other => Err(DecodeError::mismatch("object", other).at_index(i)),
        })
        .collect()
}

fn integer(value: &Value) -> Result<i64, DecodeError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(DecodeError::mismatch("integer", value)),
    }
}

fn timestamp(s: &str) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| {
            DecodeError::new(DecodeErrorKind::Timestamp {
                value: s.to_string(),
                source,
            })
        })
}

fn strings(items: &[Value]) -> Result<Vec<String>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(DecodeError::mismatch("string", other).at_index(i)),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// What went wrong while decoding.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    /// The body is not valid JSON.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A value has a different JSON type than the field requires.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A timestamp field is not RFC 3339.
    #[error("invalid RFC 3339 timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// A tolerant decoding failure, located by entity and field path.
#[derive(Debug)]
pub struct DecodeError {
    entity: &'static str,
    path: String,
    kind: DecodeErrorKind,
}

impl DecodeError {
    fn new(kind: DecodeErrorKind) -> Self {
        Self {
            entity: "",
            path: String::new(),
            kind,
        }
    }

    fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::new(DecodeErrorKind::TypeMismatch {
            expected,
            found: kind_of(found),
        })
    }

    fn in_entity(mut self, entity: &'static str) -> Self {
        self.entity = entity;
        self
    }

    fn at(mut self, field: &str) -> Self {
        self.path = if self.path.is_empty() {
            field.to_string()
        } else if self.path.starts_with('[') {
            format!("{field}{}", self.path)
        } else {
            format!("{field}.{}", self.path)
        };
        self
    }

    fn at_index(mut self, index: usize) -> Self {
        self.path = if self.path.is_empty() {
            format!("[{index}]")
        } else if self.path.starts_with('[') {
            format!("[{index}]{}", self.path)
        } else {
            format!("[{index}].{}", self.path)
        };
        self
    }

    /// The top-level entity being decoded.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Path of the offending field, e.g. `owner.id` or `data[2].createdat`.
    /// Empty when the failure concerns the whole body.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entity = if self.entity.is_empty() { "entity" } else { self.entity };
        match self.path.as_str() {
            "" => write!(f, "{entity}: {}", self.kind),
            path if path.starts_with('[') => write!(f, "{entity}{path}: {}", self.kind),
            path => write!(f, "{entity}.{path}: {}", self.kind),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
