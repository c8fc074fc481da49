//! Common utilities for opencode request hooks.
//!
//! This crate provides shared functionality for the Rust-based hooks:
//! - Chat request payload parsing from stdin
//! - Header output generation for stdout
//! - Debug recording

pub mod debug;
pub mod input;
pub mod output;

pub use debug::{FileRecorder, MemoryRecorder, Recorder};
pub use input::ChatRequest;
pub use output::{HeaderOutput, INITIATOR_HEADER};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::debug::{FileRecorder, Recorder};
    pub use crate::input::ChatRequest;
    pub use crate::output::{HeaderOutput, INITIATOR_HEADER};
    pub use anyhow::{Context, Result};
    pub use serde::{Deserialize, Serialize};
}
