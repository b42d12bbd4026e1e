use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::{AttachmentAction, Block, BlockElement};

/// A message attachment.
///
/// Every attribute is an `Option` so that a key missing from the source
/// document stays missing, while a key present with an empty or zero value
/// (`"text": ""`, `"id": 0`) is re-emitted unchanged. Keys this type does not
/// model are kept in `extra` and written back out. `extra` must not repeat a
/// modelled key; [`encode`](crate::codec::encode) rejects such a value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_subname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<AttachmentField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<AttachmentAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrkdwn_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<Timestamp>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A legacy short/long field shown in a table under the attachment text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttachmentField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `ts` is sent both as a JSON number and as a string; either is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Number(Number),
    Text(String),
}

/// Which rendering mode an attachment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Neither legacy content nor blocks
    Empty,
    /// `text`, `fields` and/or `actions`
    Legacy,
    /// `blocks`
    Blocks,
    /// Both modes at once; accepted and preserved
    Mixed,
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Legacy => write!(f, "legacy"),
            Self::Blocks => write!(f, "blocks"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

impl Attachment {
    pub fn content_mode(&self) -> ContentMode {
        let legacy = self.text.is_some() || self.fields.is_some() || self.actions.is_some();
        let blocks = self.blocks.is_some();
        match (legacy, blocks) {
            (false, false) => ContentMode::Empty,
            (true, false) => ContentMode::Legacy,
            (false, true) => ContentMode::Blocks,
            (true, true) => ContentMode::Mixed,
        }
    }

    /// Tags of blocks and elements that decoded to the opaque variant, as
    /// `(kind, tag)` pairs in document order.
    pub fn unrecognized_tags(&self) -> Vec<(&'static str, &str)> {
        let mut found = Vec::new();
        for block in self.blocks.iter().flatten() {
            if let Block::Unknown(opaque) = block {
                found.push(("block", opaque.tag.as_str()));
            }
            for element in block.elements() {
                if let BlockElement::Unknown(opaque) = element {
                    found.push(("element", opaque.tag.as_str()));
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_encodes_empty_object() {
        let value = serde_json::to_value(Attachment::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_zero_id_and_empty_strings_are_present() {
        let source = json!({"id": 0, "color": "", "fallback": "", "text": "", "actions": [], "blocks": []});
        let attachment: Attachment = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(attachment.id, Some(0));
        assert_eq!(attachment.text.as_deref(), Some(""));
        assert_eq!(attachment.actions, Some(vec![]));
        assert_eq!(attachment.blocks, Some(vec![]));
        assert_eq!(serde_json::to_value(&attachment).unwrap(), source);
    }

    #[test]
    fn test_content_mode() {
        let mut attachment = Attachment::default();
        assert_eq!(attachment.content_mode(), ContentMode::Empty);

        attachment.text = Some(String::new());
        assert_eq!(attachment.content_mode(), ContentMode::Legacy);

        attachment.blocks = Some(vec![]);
        assert_eq!(attachment.content_mode(), ContentMode::Mixed);

        attachment.text = None;
        assert_eq!(attachment.content_mode(), ContentMode::Blocks);
        assert_eq!(attachment.content_mode().to_string(), "blocks");
    }

    #[test]
    fn test_ts_number_or_string() {
        let numeric: Attachment = serde_json::from_value(json!({"ts": 123456789})).unwrap();
        assert_eq!(numeric.ts, Some(Timestamp::Number(123456789.into())));

        let text: Attachment = serde_json::from_value(json!({"ts": "1355517523.000005"})).unwrap();
        assert_eq!(text.ts, Some(Timestamp::Text("1355517523.000005".to_string())));
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!({"ts": "1355517523.000005"})
        );
    }

    #[test]
    fn test_extra_keys_are_kept() {
        let source = json!({"text": "hi", "app_unfurl_url": "https://example.com", "is_share": true});
        let attachment: Attachment = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(attachment.extra.len(), 2);
        assert_eq!(serde_json::to_value(&attachment).unwrap(), source);
    }

    #[test]
    fn test_fields_with_short_flag() {
        let source = json!({"fields": [{"title": "Priority", "value": "High", "short": false}]});
        let attachment: Attachment = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(
            attachment.fields.as_ref().and_then(|f| f[0].short),
            Some(false)
        );
        assert_eq!(serde_json::to_value(&attachment).unwrap(), source);
    }

    #[test]
    fn test_unrecognized_tags_in_order() {
        let attachment: Attachment = serde_json::from_value(json!({
            "blocks": [
                {"type": "rich_text", "elements": []},
                {"type": "actions", "elements": [
                    {"type": "button", "text": {"type": "plain_text", "text": "Go"}},
                    {"type": "datepicker"}
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(
            attachment.unrecognized_tags(),
            vec![("block", "rich_text"), ("element", "datepicker")]
        );
    }
}
