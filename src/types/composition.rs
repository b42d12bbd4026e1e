use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text formatting modes for Block Kit text objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Rendered as-is
    PlainText,
    /// Slack's markdown dialect
    Mrkdwn,
}

impl TextKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Mrkdwn => "mrkdwn",
        }
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text composition object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbatim: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            emoji: None,
            verbatim: None,
            extra: Map::new(),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
            verbatim: None,
            extra: Map::new(),
        }
    }
}

/// One choice in a select menu or overflow element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionObject {
    pub text: TextObject,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TextObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OptionObject {
    pub fn new(text: TextObject, value: impl Into<String>) -> Self {
        Self {
            text,
            value: value.into(),
            description: None,
            url: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub label: TextObject,
    pub options: Vec<OptionObject>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
