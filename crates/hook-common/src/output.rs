//! Header output generation for stdout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Header carrying the sampled initiator label.
pub const INITIATOR_HEADER: &str = "x-initiator";

/// Header patch merged by the host into the outgoing request.
///
/// The map starts absent and is created on the first `set`, so a hook that
/// never decides anything serializes to `{}` and writes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderOutput {
    /// Headers to merge into the outgoing request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl HeaderOutput {
    /// Create an empty header patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, creating the map when absent.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
    }

    /// Look up a header value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|map| map.get(name))
            .map(String::as_str)
    }

    /// Whether any header has been set.
    pub fn has_headers(&self) -> bool {
        self.headers.as_ref().is_some_and(|map| !map.is_empty())
    }

    /// Write the patch to stdout.
    pub fn write_stdout(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        io::stdout().write_all(json.as_bytes())?;
        io::stdout().flush()?;
        Ok(())
    }
}
