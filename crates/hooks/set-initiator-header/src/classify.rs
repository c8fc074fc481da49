//! First-message vs follow-up classification.
//!
//! Pure functions over a fetched history snapshot and the incoming
//! request. A session counts as a follow-up when qualifying assistant or
//! tool activity exists strictly before the incoming message.

use hook_common::input::ChatRequest;
use hook_session::message::HistoryMessage;

/// Filter fetched history down to messages prior to the incoming one.
///
/// Excludes the incoming message itself and all of its children (replies
/// whose `parentID` is the incoming id), so the request never classifies
/// itself. When both timestamps are known, only strictly older messages
/// survive; when either is unknown the candidate is retained.
pub fn prior_messages<'a>(
    messages: &'a [HistoryMessage],
    incoming: &ChatRequest,
) -> Vec<&'a HistoryMessage> {
    let current_id = incoming.message.id.as_deref();
    let current_created = incoming.message.time.created;

    messages
        .iter()
        .filter(|message| {
            let info = &message.info;
            if let Some(id) = current_id {
                if info.id.as_deref() == Some(id) {
                    return false;
                }
                if info.parent_id.as_deref() == Some(id) {
                    return false;
                }
            }
            match (current_created, info.time.created) {
                (Some(current), Some(created)) => created < current,
                _ => true,
            }
        })
        .collect()
}

/// Check whether qualifying prior activity exists.
pub fn is_non_first_message(prior: &[&HistoryMessage]) -> bool {
    prior.iter().any(|message| message.is_agent_activity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(id: &str, created: Option<f64>) -> ChatRequest {
        serde_json::from_value(json!({
            "sessionID": "ses_01",
            "message": {"id": id, "time": {"created": created}},
        }))
        .unwrap()
    }

    fn message(value: serde_json::Value) -> HistoryMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_assistant_before_incoming_is_followup() {
        let history = vec![
            message(json!({"info": {"id": "msg_01", "role": "user", "time": {"created": 100.0}}})),
            message(
                json!({"info": {"id": "msg_02", "role": "assistant", "time": {"created": 200.0}}}),
            ),
        ];
        let incoming = request("msg_09", Some(300.0));

        let prior = prior_messages(&history, &incoming);
        assert_eq!(prior.len(), 2);
        assert!(is_non_first_message(&prior));
    }

    #[test]
    fn test_incoming_and_its_replies_are_excluded() {
        let history = vec![
            message(json!({"info": {"id": "msg_09", "role": "user"}})),
            message(json!({"info": {"id": "msg_10", "role": "assistant", "parentID": "msg_09"}})),
            message(json!({"info": {"id": "msg_11", "role": "tool", "parentID": "msg_09"}})),
        ];
        let incoming = request("msg_09", None);

        let prior = prior_messages(&history, &incoming);
        assert!(prior.is_empty());
        assert!(!is_non_first_message(&prior));
    }

    #[test]
    fn test_timestamp_cutoff_is_strict() {
        let history = vec![
            message(
                json!({"info": {"id": "msg_01", "role": "assistant", "time": {"created": 300.0}}}),
            ),
            message(
                json!({"info": {"id": "msg_02", "role": "assistant", "time": {"created": 400.0}}}),
            ),
        ];
        let incoming = request("msg_09", Some(300.0));

        // Neither created-at-300 nor created-after survives a cutoff of 300.
        assert!(prior_messages(&history, &incoming).is_empty());
    }

    #[test]
    fn test_unknown_timestamps_are_retained() {
        let history = vec![message(json!({"info": {"id": "msg_01", "role": "assistant"}}))];

        let with_cutoff = request("msg_09", Some(300.0));
        assert_eq!(prior_messages(&history, &with_cutoff).len(), 1);

        let without_cutoff = request("msg_09", None);
        assert_eq!(prior_messages(&history, &without_cutoff).len(), 1);
    }

    #[test]
    fn test_tool_part_qualifies() {
        let history = vec![message(json!({
            "info": {"id": "msg_01", "role": "user", "time": {"created": 100.0}},
            "parts": [{"type": "tool"}]
        }))];
        let incoming = request("msg_09", Some(300.0));

        let prior = prior_messages(&history, &incoming);
        assert!(is_non_first_message(&prior));
    }

    #[test]
    fn test_user_only_history_is_first() {
        let history = vec![
            message(json!({"info": {"id": "msg_01", "role": "user", "time": {"created": 100.0}}})),
        ];
        let incoming = request("msg_09", Some(300.0));

        let prior = prior_messages(&history, &incoming);
        assert_eq!(prior.len(), 1);
        assert!(!is_non_first_message(&prior));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let history = vec![
            message(
                json!({"info": {"id": "msg_02", "role": "assistant", "time": {"created": 200.0}}}),
            ),
        ];
        let incoming = request("msg_09", Some(300.0));

        let first = is_non_first_message(&prior_messages(&history, &incoming));
        for _ in 0..5 {
            assert_eq!(is_non_first_message(&prior_messages(&history, &incoming)), first);
        }
    }
}
