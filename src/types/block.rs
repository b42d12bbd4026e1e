use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::composition::TextObject;
use super::element::BlockElement;
use super::tagged::{decode_variant, split_tag, Opaque, Tagged};

/// A Block Kit layout block, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Section(SectionBlock),
    Divider(DividerBlock),
    Header(HeaderBlock),
    Context(ContextBlock),
    Actions(ActionsBlock),
    Image(ImageBlock),
    /// Any block type not modelled above, kept verbatim.
    Unknown(Opaque),
}

impl Block {
    /// The `type` tag this block encodes with.
    pub fn tag(&self) -> &str {
        match self {
            Self::Section(_) => "section",
            Self::Divider(_) => "divider",
            Self::Header(_) => "header",
            Self::Context(_) => "context",
            Self::Actions(_) => "actions",
            Self::Image(_) => "image",
            Self::Unknown(opaque) => &opaque.tag,
        }
    }

    pub fn block_id(&self) -> Option<&str> {
        match self {
            Self::Section(b) => b.block_id.as_deref(),
            Self::Divider(b) => b.block_id.as_deref(),
            Self::Header(b) => b.block_id.as_deref(),
            Self::Context(b) => b.block_id.as_deref(),
            Self::Actions(b) => b.block_id.as_deref(),
            Self::Image(b) => b.block_id.as_deref(),
            Self::Unknown(opaque) => opaque.fields.get("block_id").and_then(Value::as_str),
        }
    }

    /// Elements nested directly in this block (accessory or children).
    pub fn elements(&self) -> Vec<&BlockElement> {
        match self {
            Self::Section(b) => b.accessory.iter().collect(),
            Self::Context(b) => b.elements.iter().collect(),
            Self::Actions(b) => b.elements.iter().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<TextObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory: Option<BlockElement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DividerBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub text: TextObject,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub elements: Vec<BlockElement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionsBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub elements: Vec<BlockElement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub image_url: String,
    pub alt_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextObject>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tag = self.tag();
        match self {
            Self::Section(body) => Tagged { tag, body }.serialize(serializer),
            Self::Divider(body) => Tagged { tag, body }.serialize(serializer),
            Self::Header(body) => Tagged { tag, body }.serialize(serializer),
            Self::Context(body) => Tagged { tag, body }.serialize(serializer),
            Self::Actions(body) => Tagged { tag, body }.serialize(serializer),
            Self::Image(body) => Tagged { tag, body }.serialize(serializer),
            Self::Unknown(opaque) => opaque.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let (tag, fields) = split_tag::<D::Error>(object, "block")?;

        let block = match tag.as_str() {
            "section" => Self::Section(decode_variant::<_, D::Error>(fields, "block", &tag)?),
            "divider" => Self::Divider(decode_variant::<_, D::Error>(fields, "block", &tag)?),
            "header" => Self::Header(decode_variant::<_, D::Error>(fields, "block", &tag)?),
            "context" => Self::Context(decode_variant::<_, D::Error>(fields, "block", &tag)?),
            "actions" => Self::Actions(decode_variant::<_, D::Error>(fields, "block", &tag)?),
            "image" => Self::Image(decode_variant::<_, D::Error>(fields, "block", &tag)?),
            _ => Self::Unknown(Opaque { tag, fields }),
        };
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::element::StaticSelectElement;
    use crate::types::OptionObject;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn section_fixture() -> Value {
        json!({
            "type": "section",
            "block_id": "xxxx",
            "text": {"type": "mrkdwn", "text": "Pick something:", "verbatim": true},
            "accessory": {
                "type": "static_select",
                "action_id": "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx",
                "placeholder": {"type": "plain_text", "text": "Select one item", "emoji": true},
                "options": [
                    {"text": {"type": "plain_text", "text": "ghi", "emoji": true}, "value": "ghi"}
                ]
            }
        })
    }

    #[test]
    fn test_section_with_accessory() {
        let block: Block = serde_json::from_value(section_fixture()).unwrap();
        let Block::Section(section) = &block else {
            panic!("expected a section, got {block:?}");
        };
        assert_eq!(section.block_id.as_deref(), Some("xxxx"));
        assert_eq!(section.text.as_ref().and_then(|t| t.verbatim), Some(true));
        assert_eq!(block.elements().len(), 1);
        assert_eq!(serde_json::to_value(&block).unwrap(), section_fixture());
    }

    #[test]
    fn test_constructed_section_encodes_tag() {
        let mut text = TextObject::plain("ghi");
        text.emoji = Some(true);
        let block = Block::Section(SectionBlock {
            text: Some(TextObject::mrkdwn("Pick something:")),
            accessory: Some(BlockElement::StaticSelect(StaticSelectElement {
                options: Some(vec![OptionObject::new(text, "ghi")]),
                ..Default::default()
            })),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "section",
                "text": {"type": "mrkdwn", "text": "Pick something:"},
                "accessory": {
                    "type": "static_select",
                    "options": [
                        {"text": {"type": "plain_text", "text": "ghi", "emoji": true}, "value": "ghi"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_divider_and_context() {
        let source = json!([
            {"type": "divider"},
            {"type": "context", "elements": [
                {"type": "image", "image_url": "https://example.com/a.png", "alt_text": "a"},
                {"type": "plain_text", "text": "note", "emoji": false}
            ]}
        ]);
        let blocks: Vec<Block> = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(blocks[0].tag(), "divider");
        assert_eq!(blocks[1].elements().len(), 2);
        assert_eq!(serde_json::to_value(&blocks).unwrap(), source);
    }

    #[test]
    fn test_unknown_block_round_trips() {
        let source = json!({"type": "rich_text", "block_id": "r1", "elements": [{"type": "rich_text_section"}]});
        let block: Block = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(block.tag(), "rich_text");
        assert_eq!(block.block_id(), Some("r1"));
        assert_eq!(serde_json::to_value(&block).unwrap(), source);
    }

    #[test]
    fn test_block_missing_type_fails() {
        let result: Result<Block, _> = serde_json::from_value(json!({"block_id": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_header_requires_text() {
        let result: Result<Block, _> = serde_json::from_value(json!({"type": "header"}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid block `header`"));
    }
}
