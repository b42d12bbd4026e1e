//! JSON encoding and decoding for [`Attachment`].
//!
//! Decoding is all-or-nothing: on error no attachment is returned. Encoding
//! writes only the fields that are present, so `encode(decode(doc))` is
//! value-equal to `doc` for any document the data model covers.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use tracing::debug;

use crate::error::{AttachmentError, Result};
use crate::types::Attachment;

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Reject blocks and elements whose `type` is not modelled, instead of
    /// carrying them through as opaque values.
    pub strict: bool,
}

pub fn decode(bytes: &[u8]) -> Result<Attachment> {
    decode_with(bytes, DecodeOptions::default())
}

pub fn decode_str(json: &str) -> Result<Attachment> {
    decode(json.as_bytes())
}

pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Attachment> {
    let attachment: Attachment = serde_json::from_slice(bytes).map_err(AttachmentError::Parse)?;

    if options.strict {
        if let Some(&(kind, tag)) = attachment.unrecognized_tags().first() {
            return Err(AttachmentError::SchemaMismatch {
                kind,
                tag: tag.to_string(),
            });
        }
    }

    debug!(
        mode = %attachment.content_mode(),
        extra_keys = attachment.extra.len(),
        "decoded attachment"
    );
    Ok(attachment)
}

/// Encodes compactly.
///
/// Fails with [`AttachmentError::Encode`] if an `extra` map repeats a key the
/// data model already writes (`text` in [`Attachment::extra`], `type` in a
/// block's `extra`), since the output would carry that key twice.
pub fn encode(attachment: &Attachment) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(attachment).map_err(AttachmentError::Encode)?;
    check_unique_keys(&bytes)?;
    Ok(bytes)
}

pub fn encode_pretty(attachment: &Attachment) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(attachment).map_err(AttachmentError::Encode)?;
    check_unique_keys(&bytes)?;
    Ok(bytes)
}

fn check_unique_keys(bytes: &[u8]) -> Result<()> {
    serde_json::from_slice::<UniqueKeys>(bytes).map_err(AttachmentError::Encode)?;
    Ok(())
}

/// Walks a JSON document, failing on the first object that repeats a key.
struct UniqueKeys;

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeys;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<UniqueKeys, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<UniqueKeys>()?.is_some() {}
        Ok(UniqueKeys)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<UniqueKeys, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                return Err(de::Error::custom(format_args!("duplicate key `{key}`")));
            }
            map.next_value::<UniqueKeys>()?;
        }
        Ok(UniqueKeys)
    }
}

/// Outcome of decoding a document and encoding it again.
#[derive(Debug)]
pub struct RoundTrip {
    pub attachment: Attachment,
    pub encoded: Vec<u8>,
    /// Value-level differences between the source and `encoded`.
    pub differences: Vec<String>,
}

impl RoundTrip {
    pub fn is_lossless(&self) -> bool {
        self.differences.is_empty()
    }
}

pub fn round_trip(bytes: &[u8], options: DecodeOptions) -> Result<RoundTrip> {
    let original: Value = serde_json::from_slice(bytes).map_err(AttachmentError::Parse)?;
    let attachment = decode_with(bytes, options)?;
    let encoded = encode(&attachment)?;
    let reencoded: Value = serde_json::from_slice(&encoded).map_err(AttachmentError::Encode)?;

    let differences = diff(&original, &reencoded);
    debug!(differences = differences.len(), "round trip complete");

    Ok(RoundTrip {
        attachment,
        encoded,
        differences,
    })
}

/// Compare two JSON values ignoring key order.
///
/// Returns one line per difference, each prefixed with the path of the value
/// (`blocks[0].accessory.action_id`). An empty result means the values are
/// equal.
pub fn diff(expected: &Value, actual: &Value) -> Vec<String> {
    let mut differences = Vec::new();
    diff_at("", expected, actual, &mut differences);
    differences
}

fn diff_at(path: &str, expected: &Value, actual: &Value, out: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, expected_value) in expected {
                let child = join_key(path, key);
                match actual.get(key) {
                    Some(actual_value) => diff_at(&child, expected_value, actual_value, out),
                    None => out.push(format!("{child}: missing, expected {expected_value}")),
                }
            }
            for (key, actual_value) in actual {
                if !expected.contains_key(key) {
                    out.push(format!("{}: unexpected {actual_value}", join_key(path, key)));
                }
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            if expected.len() != actual.len() {
                out.push(format!(
                    "{}: expected {} element(s), got {}",
                    display_path(path),
                    expected.len(),
                    actual.len()
                ));
            }
            for (index, (e, a)) in expected.iter().zip(actual).enumerate() {
                diff_at(&format!("{path}[{index}]"), e, a, out);
            }
        }
        (e, a) if e == a => {}
        (e, a) => out.push(format!("{}: expected {e}, got {a}", display_path(path))),
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
