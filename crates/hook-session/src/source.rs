//! Message retrieval from the opencode server.

use crate::message::HistoryMessage;
use serde_json::Value;
use thiserror::Error;

/// Maximum number of most-recent messages fetched per session.
pub const MESSAGE_LOOKBACK_LIMIT: usize = 10;

/// Environment variable holding the opencode server base URL.
pub const SERVER_ENV: &str = "OPENCODE_SERVER";

/// Query parameters for a history fetch.
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Maximum number of messages to return
    pub limit: usize,

    /// Working-directory scope, when the session is project-scoped
    pub directory: Option<String>,
}

impl MessageQuery {
    /// Query for the standard lookback window.
    pub fn lookback(directory: Option<String>) -> Self {
        Self {
            limit: MESSAGE_LOOKBACK_LIMIT,
            directory,
        }
    }
}

/// Why a history fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server address not configured (OPENCODE_SERVER unset)")]
    ServerUnconfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response payload is not a message list")]
    MalformedResponse,
}

/// Source of session history messages.
pub trait MessageSource {
    /// Fetch the most recent messages of a session, newest window first.
    fn fetch_messages(
        &self,
        session_id: &str,
        query: &MessageQuery,
    ) -> Result<Vec<HistoryMessage>, FetchError>;
}

/// Message source backed by the opencode server HTTP API.
///
/// No client-side timeout is configured; the fetch inherits whatever the
/// server and transport impose.
#[derive(Debug, Clone)]
pub struct HttpMessageSource {
    base_url: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpMessageSource {
    /// Create a source for the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Create a source from the `OPENCODE_SERVER` environment variable.
    ///
    /// A missing variable is not an error here: the source reports
    /// `ServerUnconfigured` at fetch time so callers handle it on the
    /// same path as any other retrieval failure.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(SERVER_ENV).ok().filter(|url| !url.is_empty()),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl MessageSource for HttpMessageSource {
    fn fetch_messages(
        &self,
        session_id: &str,
        query: &MessageQuery,
    ) -> Result<Vec<HistoryMessage>, FetchError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(FetchError::ServerUnconfigured)?;

        let url = format!(
            "{}/session/{}/message",
            base.trim_end_matches('/'),
            session_id
        );

        let mut request = self
            .client
            .get(&url)
            .query(&[("limit", query.limit.to_string())]);
        if let Some(directory) = &query.directory {
            request = request.query(&[("directory", directory.as_str())]);
        }

        let payload: Value = request.send()?.error_for_status()?.json()?;
        parse_messages(payload)
    }
}

/// Extract the message list from a response payload.
///
/// Accepts a bare array or a `{"data": [...]}` envelope; anything else is
/// malformed.
fn parse_messages(payload: Value) -> Result<Vec<HistoryMessage>, FetchError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(FetchError::MalformedResponse),
        },
        _ => return Err(FetchError::MalformedResponse),
    };

    // Elements are parsed leniently: a message with malformed fields still
    // loads and simply never qualifies for anything those fields gate. Only
    // a non-sequence payload means the history is unusable.
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}
