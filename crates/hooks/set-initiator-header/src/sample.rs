//! Weighted initiator sampling.

use rand::Rng;

/// Who triggered a chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initiator {
    Agent,
    User,
}

impl Initiator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Initiator::Agent => "agent",
            Initiator::User => "user",
        }
    }
}

/// One sampling outcome, with its diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub initiator: Initiator,
    pub random_percent: f64,
    pub threshold_percent: f64,
}

/// Draw uniformly in [0, 100) and label `agent` iff strictly below the
/// threshold. A threshold of 0 never yields `agent`; 100 always does,
/// since the draw never reaches 100.
pub fn sample_initiator<R: Rng + ?Sized>(rng: &mut R, agent_percent: f64) -> Sample {
    let random_percent = rng.random_range(0.0..100.0);
    let initiator = if random_percent < agent_percent {
        Initiator::Agent
    } else {
        Initiator::User
    };
    Sample {
        initiator,
        random_percent,
        threshold_percent: agent_percent,
    }
}
