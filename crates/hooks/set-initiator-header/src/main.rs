//! chat.headers hook: label outgoing GitHub Copilot requests with `x-initiator`.
//!
//! Looks at recent session history to tell first messages from follow-ups,
//! then samples the initiator label against the configured percentage for
//! that class (`firstMessageAgentPercent` / `followupMessageAgentPercent`).
//! When history cannot be loaded the label falls back to "agent".

use anyhow::Result;
use hook_common::prelude::*;
use hook_session::HttpMessageSource;

mod classify;
mod decide;
mod sample;

use decide::Orchestrator;

fn main() -> Result<()> {
    let incoming = ChatRequest::from_stdin()?;

    let source = HttpMessageSource::from_env();
    let recorder = FileRecorder::from_env();
    let directory = std::env::var("OPENCODE_DIRECTORY").ok();

    let mut output = HeaderOutput::new();
    Orchestrator::new(&source, &recorder)
        .with_directory(directory)
        .apply(&incoming, &mut output, &mut rand::rng());

    if output.has_headers() {
        output.write_stdout()?;
    }

    // Silent pass when the provider gate did not match
    Ok(())
}
