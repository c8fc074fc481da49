//! Session history message snapshot types.
//!
//! Read-only view of what the server returns for a session's recent
//! messages. Every field is optional at the wire level; a message missing
//! a field simply does not qualify for whatever that field gates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Deserialize a field tolerantly: a value of the wrong shape becomes the
/// default instead of failing the surrounding message. A malformed field
/// must only disqualify what it gates, never the whole history.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// One message in a session's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Message metadata
    #[serde(default, deserialize_with = "lenient")]
    pub info: MessageInfo,

    /// Content parts (text, tool invocations, ...)
    #[serde(default, deserialize_with = "lenient")]
    pub parts: Vec<MessagePart>,
}

/// Message metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<Role>,

    /// Message this one replies to
    #[serde(rename = "parentID", alias = "parentId", default, deserialize_with = "lenient")]
    pub parent_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub time: MessageTime,
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
    #[serde(other)]
    Other,
}

/// Creation timestamp wrapper (epoch milliseconds).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MessageTime {
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<f64>,
}

/// One content part of a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePart {
    /// Part type (e.g. "text", "tool")
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub part_type: String,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MessagePart {
    /// Check if this part records a tool invocation.
    pub fn is_tool(&self) -> bool {
        self.part_type == "tool"
    }
}

impl HistoryMessage {
    /// Check if this message records assistant or tool activity.
    pub fn is_agent_activity(&self) -> bool {
        if matches!(self.info.role, Some(Role::Assistant) | Some(Role::Tool)) {
            return true;
        }
        self.parts.iter().any(MessagePart::is_tool)
    }
}
