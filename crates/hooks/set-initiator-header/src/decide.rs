//! Decision orchestration for the `x-initiator` header.

use crate::classify::{is_non_first_message, prior_messages};
use crate::sample::{sample_initiator, Initiator, Sample};
use hook_common::debug::Recorder;
use hook_common::input::{percent_or, ChatRequest};
use hook_common::output::{HeaderOutput, INITIATOR_HEADER};
use hook_session::source::{MessageQuery, MessageSource};
use rand::Rng;

/// Provider identifiers containing this substring get the header.
pub const PROVIDER_MATCH: &str = "github-copilot";

pub const DEFAULT_FIRST_MESSAGE_AGENT_PERCENT: f64 = 0.0;
pub const DEFAULT_FOLLOWUP_MESSAGE_AGENT_PERCENT: f64 = 100.0;

/// Which branch of the decision ladder fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecisionMode {
    HistoryUnavailable,
    First,
    Followup,
}

impl DecisionMode {
    fn as_str(&self) -> &'static str {
        match self {
            DecisionMode::HistoryUnavailable => "history-unavailable",
            DecisionMode::First => "first",
            DecisionMode::Followup => "followup",
        }
    }
}

/// Composes history retrieval, classification and sampling into one
/// header decision per invocation.
pub struct Orchestrator<'a, S, R> {
    source: &'a S,
    recorder: &'a R,
    directory: Option<String>,
}

impl<'a, S: MessageSource, R: Recorder> Orchestrator<'a, S, R> {
    pub fn new(source: &'a S, recorder: &'a R) -> Self {
        Self {
            source,
            recorder,
            directory: None,
        }
    }

    /// Scope history fetches to a working directory.
    pub fn with_directory(mut self, directory: Option<String>) -> Self {
        self.directory = directory;
        self
    }

    /// Decide the initiator for one request and write it into `output`.
    ///
    /// Never fails: every retrieval problem degrades to the fail-safe
    /// `agent` label, and requests for other providers are left untouched.
    pub fn apply<G: Rng>(&self, incoming: &ChatRequest, output: &mut HeaderOutput, rng: &mut G) {
        if !incoming.model.provider_id.contains(PROVIDER_MATCH) {
            return;
        }

        let options = &incoming.provider.options;
        let first_percent = percent_or(
            options.first_message_agent_percent.as_ref(),
            DEFAULT_FIRST_MESSAGE_AGENT_PERCENT,
        );
        let followup_percent = percent_or(
            options.followup_message_agent_percent.as_ref(),
            DEFAULT_FOLLOWUP_MESSAGE_AGENT_PERCENT,
        );

        let mut loaded_history = false;
        let mut non_first = false;

        match incoming.resolve_session_id() {
            Some(session_id) => {
                let query = MessageQuery::lookback(self.directory.clone());
                match self.source.fetch_messages(session_id, &query) {
                    Ok(messages) => {
                        loaded_history = true;
                        let prior = prior_messages(&messages, incoming);
                        non_first = is_non_first_message(&prior);
                    }
                    Err(err) => {
                        self.recorder
                            .record(&format!("[HEADERS] session messages failed: {err}"));
                    }
                }
            }
            None => {
                self.recorder
                    .record("[HEADERS] missing session id in incoming payload");
            }
        }

        let (mode, initiator, sample) = if !loaded_history {
            // Fail-safe: an unavailable history must never pick "user".
            (DecisionMode::HistoryUnavailable, Initiator::Agent, None)
        } else if non_first {
            let sample = sample_initiator(rng, followup_percent);
            (DecisionMode::Followup, sample.initiator, Some(sample))
        } else {
            let sample = sample_initiator(rng, first_percent);
            (DecisionMode::First, sample.initiator, Some(sample))
        };

        output.set(INITIATOR_HEADER, initiator.as_str());
        self.record_decision(mode, initiator, sample, first_percent, followup_percent);
    }

    fn record_decision(
        &self,
        mode: DecisionMode,
        initiator: Initiator,
        sample: Option<Sample>,
        first_percent: f64,
        followup_percent: f64,
    ) {
        let line = match sample {
            Some(sample) => format!(
                "[HEADERS] mode={} x-initiator={} random={:.2} threshold={:.2} firstAgentPercent={:.2} followupAgentPercent={:.2}",
                mode.as_str(),
                initiator.as_str(),
                sample.random_percent,
                sample.threshold_percent,
                first_percent,
                followup_percent,
            ),
            None => format!(
                "[HEADERS] mode={} x-initiator={} firstAgentPercent={:.2} followupAgentPercent={:.2}",
                mode.as_str(),
                initiator.as_str(),
                first_percent,
                followup_percent,
            ),
        };
        self.recorder.record(&line);
    }
}
