//! Item Data Types
//!
//! Defines the stored `Item` record, the closed set of values an extra field may
//! hold, and the partial payload (`ItemPatch`) callers send to create or update
//! an item.

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Names of the fields the store manages itself. Callers may send them, but
/// the store always overrides them.
pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Unique identifier for an item.
///
/// Wrapper around a UUID v4 string. Assigned by the store at creation and never
/// reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Generates a new random UUID v4-based ItemId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value held by a caller-supplied extra field.
///
/// Only scalar shapes are accepted. Arrays and objects are rejected when the
/// payload is parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Converts a JSON value into a field value. JSON strings always become
    /// `Text`, even when they look like dates.
    pub fn from_json(field: &str, value: serde_json::Value) -> Result<Self, PayloadError> {
        match value {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => Ok(Self::Number(n)),
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err(PayloadError::UnsupportedValue {
                    field: field.to_string(),
                })
            }
        }
    }

    /// String form used when a filter compares against a non-text value.
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => render_number(n),
            Self::Text(s) => s.clone(),
            Self::Timestamp(ts) => timestamp::format_timestamp(ts),
        }
    }
}

// Integral floats render without a fractional part ("3", not "3.0").
fn render_number(n: &serde_json::Number) -> String {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if n.is_f64()
        && let Some(f) = n.as_f64()
        && f.fract() == 0.0
        && f.abs() <= MAX_SAFE_INTEGER
    {
        return format!("{}", f as i64);
    }
    n.to_string()
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Timestamp(ts) => timestamp::serialize(ts, serializer),
        }
    }
}

/// The stored record.
///
/// Serializes with camelCase timestamps and the extra fields flattened beside
/// the fixed ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl Item {
    /// Looks up a field by its JSON name. Returns `None` when the item has no
    /// value for it.
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            FIELD_ID => Some(FieldValue::Text(self.id.0.clone())),
            FIELD_NAME => Some(FieldValue::Text(self.name.clone())),
            FIELD_DESCRIPTION => self.description.clone().map(FieldValue::Text),
            FIELD_CREATED_AT => Some(FieldValue::Timestamp(self.created_at)),
            FIELD_UPDATED_AT => Some(FieldValue::Timestamp(self.updated_at)),
            _ => self.extra.get(key).cloned(),
        }
    }
}

/// Partial item sent by a caller.
///
/// For `name` and `description` the outer `Option` says whether the field was
/// present; `Some(None)` means it was sent as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub extra: BTreeMap<String, FieldValue>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Parses a JSON request body. Store-managed keys (`id`, `createdAt`,
    /// `updatedAt`) are dropped.
    pub fn from_json(value: serde_json::Value) -> Result<Self, PayloadError> {
        let serde_json::Value::Object(fields) = value else {
            return Err(PayloadError::NotAnObject);
        };

        let mut patch = Self::new();
        for (key, value) in fields {
            match key.as_str() {
                FIELD_ID | FIELD_CREATED_AT | FIELD_UPDATED_AT => {}
                FIELD_NAME => patch.name = Some(text_field(FIELD_NAME, value)?),
                FIELD_DESCRIPTION => {
                    patch.description = Some(text_field(FIELD_DESCRIPTION, value)?)
                }
                _ => {
                    let value = FieldValue::from_json(&key, value)?;
                    patch.extra.insert(key, value);
                }
            }
        }
        Ok(patch)
    }
}

fn text_field(field: &str, value: serde_json::Value) -> Result<Option<String>, PayloadError> {
    match value {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Null => Ok(None),
        _ => Err(PayloadError::WrongType {
            field: field.to_string(),
            expected: "string",
        }),
    }
}

/// Candidate record checked by the validator before anything is committed.
///
/// Built either from an empty record (create) or from the existing item
/// (update), with the caller's patch merged on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub extra: BTreeMap<String, FieldValue>,
}

impl ItemDraft {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: Some(item.name.clone()),
            description: item.description.clone(),
            extra: item.extra.clone(),
        }
    }

    /// Merges a patch on top: present fields overwrite, absent fields keep
    /// their current value.
    pub fn apply(mut self, patch: ItemPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.extra.extend(patch.extra);
        self
    }
}

/// A request body that cannot be turned into an `ItemPatch`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Field '{field}' must be a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Field '{field}' has an unsupported value; only strings, numbers, booleans and null are accepted")]
    UnsupportedValue { field: String },
}
