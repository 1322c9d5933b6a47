//! Canonical structural descriptors used for equality and deduplication.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, SpgError};
use crate::hash::stable_hash_string;
use crate::serde::{canonicalize, to_canonical_value};

/// Key under which the kind of a described object is recorded.
pub const TYPE_KEY: &str = "type";

/// Canonical JSON representation of a generator, excluder or mutator.
///
/// Two descriptors are equal when their canonical values are equal field by
/// field. Identity never participates: independently constructed objects with
/// the same parameters describe the same logical modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(Value);

impl Descriptor {
    /// Describes `params` as an object tagged with `kind` under [`TYPE_KEY`].
    ///
    /// `params` must serialize to a JSON object.
    pub fn tagged<T: Serialize>(kind: &str, params: &T) -> Result<Self, SpgError> {
        match to_canonical_value(params)? {
            Value::Object(mut fields) => {
                fields.insert(TYPE_KEY.to_owned(), Value::String(kind.to_owned()));
                Ok(Self(canonicalize(Value::Object(fields))))
            }
            other => Err(SpgError::Serde(
                ErrorInfo::new("descriptor-shape", "descriptor parameters must be an object")
                    .with_context("kind", kind)
                    .with_context("found", json_kind(&other)),
            )),
        }
    }

    /// Builds a descriptor from an already assembled set of fields.
    pub fn from_fields(kind: &str, mut fields: Map<String, Value>) -> Self {
        fields.insert(TYPE_KEY.to_owned(), Value::String(kind.to_owned()));
        Self(canonicalize(Value::Object(fields)))
    }

    /// Returns the recorded kind, if any.
    pub fn kind(&self) -> Option<&str> {
        self.0.get(TYPE_KEY).and_then(Value::as_str)
    }

    /// Returns the canonical JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// SHA-256 digest of the canonical bytes, used in logs and CLI output.
    pub fn digest(&self) -> Result<String, SpgError> {
        stable_hash_string(&self.0)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Keeps the first occurrence of each descriptor, preserving first-seen order.
///
/// `describe` maps an item to its descriptor. Returns the surviving items and
/// the number of dropped duplicates.
pub fn dedup_by_descriptor<T, F>(items: impl IntoIterator<Item = T>, describe: F) -> (Vec<T>, usize)
where
    F: Fn(&T) -> &Descriptor,
{
    let mut seen: Vec<Descriptor> = Vec::new();
    let mut kept = Vec::new();
    let mut dropped = 0usize;
    for item in items {
        let descriptor = describe(&item);
        if seen.iter().any(|existing| existing == descriptor) {
            dropped += 1;
            continue;
        }
        seen.push(descriptor.clone());
        kept.push(item);
    }
    (kept, dropped)
}
