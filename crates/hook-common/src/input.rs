//! Chat request payload parsing from stdin.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io::{self, Read};

/// Payload delivered by opencode for the `chat.headers` hook point.
///
/// All fields are optional at the wire level; validation happens once here
/// at the boundary so downstream logic never touches raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Session this request belongs to
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,

    /// Lowercase-d spelling used by some payload versions; payloads may
    /// carry both, so this is a separate field rather than a serde alias
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id_compat: Option<String>,

    /// Alternate session reference used by some payload versions
    #[serde(default)]
    pub session: Option<SessionRef>,

    /// The user message that triggered the request
    #[serde(default)]
    pub message: MessageRef,

    /// Model routing information
    #[serde(default)]
    pub model: ModelRef,

    /// Provider block carrying per-provider options
    #[serde(default)]
    pub provider: ProviderRef,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Session object reference (`session.id` payload shape).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRef {
    #[serde(default)]
    pub id: Option<String>,
}

/// The incoming message, as much of it as the decision needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub time: TimeRef,
}

/// Creation timestamp wrapper (epoch milliseconds).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRef {
    #[serde(default)]
    pub created: Option<f64>,
}

/// Model routing block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRef {
    /// Provider identifier (e.g. "github-copilot", "azure-openai")
    #[serde(rename = "providerID", alias = "providerId", default)]
    pub provider_id: String,
}

/// Provider block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderRef {
    #[serde(default)]
    pub options: ProviderOptions,
}

/// Per-provider options relevant to initiator sampling.
///
/// Values stay as raw JSON here: users put all sorts of things in their
/// config, and a bad value must fall back to the default instead of
/// failing the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderOptions {
    #[serde(rename = "firstMessageAgentPercent", default)]
    pub first_message_agent_percent: Option<Value>,

    #[serde(rename = "followupMessageAgentPercent", default)]
    pub followup_message_agent_percent: Option<Value>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ChatRequest {
    /// Read and parse the hook payload from stdin.
    pub fn from_stdin() -> anyhow::Result<Self> {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        let parsed: ChatRequest = serde_json::from_str(&input)?;
        Ok(parsed)
    }

    /// Resolve the session identifier across payload aliases.
    ///
    /// Returns `None` when every alias is absent or empty.
    pub fn resolve_session_id(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.session_id_compat
                    .as_deref()
                    .filter(|id| !id.is_empty())
            })
            .or_else(|| {
                self.session
                    .as_ref()
                    .and_then(|s| s.id.as_deref())
                    .filter(|id| !id.is_empty())
            })
    }
}

/// Clamp a percentage to [0, 100], falling back on non-finite input.
pub fn clamp_percent(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(0.0, 100.0)
}

/// Resolve a configured percentage from a raw JSON value.
///
/// Non-numeric and non-finite values yield the fallback; numeric values
/// are clamped to [0, 100].
pub fn percent_or(value: Option<&Value>, fallback: f64) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(v) => clamp_percent(v, fallback),
        None => fallback,
    }
}
