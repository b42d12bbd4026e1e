use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::composition::{OptionGroup, OptionObject, TextObject};
use super::tagged::{decode_variant, split_tag, Opaque, Tagged};

/// Interactive and display elements nested inside blocks.
///
/// Section accessories, `actions` block children and `context` block children
/// all share this union. Text objects appear here because `context` blocks mix
/// images with `plain_text`/`mrkdwn` items.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockElement {
    Button(ButtonElement),
    StaticSelect(StaticSelectElement),
    Image(ImageElement),
    Text(TextObject),
    Unknown(Opaque),
}

impl BlockElement {
    /// The `type` tag this element encodes with.
    pub fn tag(&self) -> &str {
        match self {
            Self::Button(_) => "button",
            Self::StaticSelect(_) => "static_select",
            Self::Image(_) => "image",
            Self::Text(text) => text.kind.as_str(),
            Self::Unknown(opaque) => &opaque.tag,
        }
    }

    pub fn action_id(&self) -> Option<&str> {
        match self {
            Self::Button(button) => button.action_id.as_deref(),
            Self::StaticSelect(select) => select.action_id.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonElement {
    pub text: TextObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A select menu with a fixed option list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticSelectElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<TextObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_groups: Option<Vec<OptionGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_option: Option<OptionObject>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub image_url: String,
    pub alt_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for BlockElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Button(body) => Tagged { tag: "button", body }.serialize(serializer),
            Self::StaticSelect(body) => Tagged {
                tag: "static_select",
                body,
            }
            .serialize(serializer),
            Self::Image(body) => Tagged { tag: "image", body }.serialize(serializer),
            // Text objects carry their own `type`.
            Self::Text(text) => text.serialize(serializer),
            Self::Unknown(opaque) => opaque.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BlockElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let (tag, mut fields) = split_tag::<D::Error>(object, "element")?;

        let element = match tag.as_str() {
            "button" => Self::Button(decode_variant::<_, D::Error>(fields, "element", &tag)?),
            "static_select" => {
                Self::StaticSelect(decode_variant::<_, D::Error>(fields, "element", &tag)?)
            }
            "image" => Self::Image(decode_variant::<_, D::Error>(fields, "element", &tag)?),
            "plain_text" | "mrkdwn" => {
                fields.insert("type".to_string(), Value::String(tag.clone()));
                Self::Text(decode_variant::<_, D::Error>(fields, "element", &tag)?)
            }
            _ => Self::Unknown(Opaque { tag, fields }),
        };
        Ok(element)
    }
}
