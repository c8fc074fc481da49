//! Session history access for opencode hooks.
//!
//! Provides:
//! - History message snapshot types
//! - Message retrieval from the opencode server

pub mod message;
pub mod source;

pub use message::{HistoryMessage, MessageInfo, MessagePart, Role};
pub use source::{FetchError, HttpMessageSource, MessageQuery, MessageSource, MESSAGE_LOOKBACK_LIMIT};
