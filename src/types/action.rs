use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Kinds of legacy (pre-Block Kit) attachment actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionType {
    Button,
    Select,
    /// Any other type string, kept as sent.
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Button => "button",
            Self::Select => "select",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        match value {
            "button" => Self::Button,
            "select" => Self::Select,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(ActionType::from(value.as_str()))
    }
}

/// A legacy interactive action (button or menu) on an attachment.
///
/// `type`, `text` and `name` are required by the platform; a document missing
/// any of them fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentAction {
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub text: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_query_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ActionOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_options: Option<Vec<ActionOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_groups: Option<Vec<ActionOptionGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmationField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttachmentAction {
    pub fn button(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ActionType::Button,
            text: text.into(),
            name: name.into(),
            style: None,
            value: None,
            url: None,
            data_source: None,
            min_query_length: None,
            options: None,
            selected_options: None,
            option_groups: None,
            confirm: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOption {
    pub text: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOptionGroup {
    pub text: String,
    pub options: Vec<ActionOption>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Confirmation dialog shown before an action fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_button_action() {
        let action: AttachmentAction =
            serde_json::from_value(json!({"type": "button", "text": "Open", "name": "open"}))
                .unwrap();
        assert_eq!(action, AttachmentAction::button("open", "Open"));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "button", "text": "Open", "name": "open"})
        );
    }

    #[test]
    fn test_unrecognized_action_type_is_kept() {
        let action: AttachmentAction =
            serde_json::from_value(json!({"type": "slider", "text": "", "name": "s"})).unwrap();
        assert_eq!(action.kind, ActionType::Other("slider".to_string()));
        assert_eq!(action.kind.to_string(), "slider");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result: Result<AttachmentAction, _> =
            serde_json::from_value(json!({"type": "button", "text": "Open"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_select_with_confirm() {
        let source = json!({
            "type": "select",
            "text": "Pick",
            "name": "pick",
            "options": [{"text": "One", "value": "1"}],
            "selected_options": [{"text": "One", "value": "1"}],
            "confirm": {"text": "Sure?", "ok_text": "Yes"}
        });
        let action: AttachmentAction = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(action.kind, ActionType::Select);
        assert_eq!(action.confirm.as_ref().map(|c| c.text.as_str()), Some("Sure?"));
        assert_eq!(serde_json::to_value(&action).unwrap(), source);
    }
}
