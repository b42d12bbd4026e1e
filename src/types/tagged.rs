//! Helpers shared by the `type`-discriminated unions (blocks and block elements).

use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const TAG: &str = "type";

/// A block or element whose `type` is not one this crate models.
///
/// The tag and every other key are carried verbatim so the value re-encodes
/// exactly as it was decoded. A `type` entry in `fields` is ignored when
/// encoding; `tag` is always the one written.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque {
    pub tag: String,
    pub fields: Map<String, Value>,
}

impl Serialize for Opaque {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TAG, &self.tag)?;
        for (key, value) in self.fields.iter().filter(|(key, _)| key.as_str() != TAG) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Serializes `body` with a leading `type` entry.
#[derive(Serialize)]
pub(crate) struct Tagged<'a, T> {
    #[serde(rename = "type")]
    pub tag: &'a str,
    #[serde(flatten)]
    pub body: &'a T,
}

/// Removes and returns the discriminator from a decoded JSON object.
pub(crate) fn split_tag<E>(
    mut object: Map<String, Value>,
    what: &str,
) -> Result<(String, Map<String, Value>), E>
where
    E: de::Error,
{
    match object.remove(TAG) {
        Some(Value::String(tag)) => Ok((tag, object)),
        Some(other) => Err(E::custom(format_args!(
            "{what} `type` must be a string, found {}",
            json_kind(&other)
        ))),
        None => Err(E::custom(format_args!("{what} is missing its `type` field"))),
    }
}

/// Decodes the remaining fields of a known variant.
///
/// Errors are surfaced instead of falling back to [`Opaque`], so a malformed
/// `section` never masquerades as an unknown block.
pub(crate) fn decode_variant<T, E>(fields: Map<String, Value>, what: &str, tag: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| E::custom(format_args!("invalid {what} `{tag}`: {e}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
