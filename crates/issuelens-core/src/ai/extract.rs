// SPDX-License-Identifier: Apache-2.0

//! JSON extraction from free-text model replies.
//!
//! Models frequently wrap the requested object in prose or markdown fences.
//! Extraction tries the greedy span from the first `{` to the last `}`,
//! then the first balanced top-level object, and finally asks the model to
//! repair its own output a bounded number of times.

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::provider::AiProvider;
use super::types::{AnalysisResult, PromptMessage};
use crate::error::IssueLensError;
use crate::pipeline::PipelineStage;

/// Instruction prefix for the repair round-trip.
pub const REPAIR_INSTRUCTION: &str =
    "The following text is not valid JSON, fix it so it *only* contains valid JSON:\n";

/// Span from the first `{` to the last `}`, inclusive.
///
/// Not nesting-aware: a reply holding two separate objects yields a span
/// covering both.
#[must_use]
pub fn greedy_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// First balanced top-level `{...}` in `text`.
///
/// Braces inside JSON string literals (including escaped quotes) are
/// ignored. Returns `None` if no object closes.
#[must_use]
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|s| &text[s..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Candidate is not valid JSON");
            None
        }
    }
}

/// Extracts the JSON object from a model reply without any network calls.
///
/// Tries the greedy span (or the whole text when there are no braces),
/// then the first balanced object. Returns `None` when neither parses to
/// a JSON object.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let greedy = greedy_object_span(text).unwrap_or(text);
    if let Some(object) = parse_object(greedy) {
        return Some(object);
    }

    let balanced = first_balanced_object(text)?;
    if balanced == greedy {
        return None;
    }
    debug!("Greedy span failed, falling back to first balanced object");
    parse_object(balanced)
}

/// Builds the repair message for an invalid reply.
#[must_use]
pub fn repair_message(invalid_reply: &str) -> PromptMessage {
    PromptMessage::user(format!("{REPAIR_INSTRUCTION}{invalid_reply}"))
}

/// Turns a model reply into an [`AnalysisResult`], repairing if needed.
///
/// On an unparseable reply, appends a repair message to `messages` and asks
/// the provider again, at most `max_repairs` times. The conversation grows
/// by one message per repair.
///
/// # Errors
///
/// Returns `MalformedOutput` once the repair budget is spent, or whatever
/// error the provider raises during a repair call.
#[instrument(skip_all, fields(provider = provider.name(), max_repairs = max_repairs))]
pub async fn extract_with_repair<P>(
    provider: &P,
    messages: &mut Vec<PromptMessage>,
    reply: String,
    max_repairs: u32,
) -> crate::Result<AnalysisResult>
where
    P: AiProvider + ?Sized,
{
    let mut reply = reply;
    let mut attempt = 0;

    loop {
        if let Some(object) = extract_json_object(&reply) {
            debug!(repairs = attempt, "Extracted JSON object from reply");
            return Ok(AnalysisResult::from_object(&object));
        }

        if attempt >= max_repairs {
            warn!(repairs = attempt, "Model output is still invalid JSON");
            return Err(IssueLensError::MalformedOutput);
        }
        attempt += 1;

        warn!(
            stage = %PipelineStage::RepairingJson,
            attempt,
            reply_length = reply.len(),
            "Model reply is not valid JSON, requesting repair"
        );
        messages.push(repair_message(&reply));
        reply = provider.generate(messages).await?;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    const VALID: &str = r#"{"summary":"x","type":"bug","priority_score":"2 - minor","suggested_labels":["bug","ui"],"potential_impact":"small"}"#;

    /// Provider that replays canned replies and records every conversation.
    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
        calls: Mutex<Vec<Vec<PromptMessage>>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AiProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, messages: &[PromptMessage]) -> crate::Result<String> {
            self.calls.lock().unwrap().push(messages.to_vec());
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra model call"))
        }
    }

    #[test]
    fn test_extracts_object_embedded_in_noise() {
        let text = format!("noise {VALID} trailing");
        let object = extract_json_object(&text).expect("should extract");
        assert_eq!(object["summary"], "x");
    }

    #[test]
    fn test_extracts_plain_json() {
        let object = extract_json_object(VALID).expect("should parse");
        assert_eq!(object["type"], "bug");
    }

    #[test]
    fn test_extracts_from_markdown_fence() {
        let text = format!("```json\n{VALID}\n```");
        assert!(extract_json_object(&text).is_some());
    }

    #[test]
    fn test_non_json_text_fails() {
        assert!(extract_json_object("I cannot help with that.").is_none());
        assert!(extract_json_object("{not json at all}").is_none());
    }

    #[test]
    fn test_non_object_json_fails() {
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("\"just a string\"").is_none());
    }

    #[test]
    fn test_greedy_span_covers_multiple_objects() {
        let text = r#"{"a":1} and {"b":2}"#;
        assert_eq!(greedy_object_span(text), Some(text));
        assert_eq!(first_balanced_object(text), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_balanced_fallback_recovers_first_object() {
        let text = r#"Here: {"summary":"first"} and also {"summary":"second"}"#;
        let object = extract_json_object(text).expect("balanced fallback");
        assert_eq!(object["summary"], "first");
    }

    #[test]
    fn test_balanced_scanner_ignores_braces_in_strings() {
        let text = r#"x {"summary":"uses } and { \" inside"} y"#;
        assert_eq!(
            first_balanced_object(text),
            Some(r#"{"summary":"uses } and { \" inside"}"#)
        );
    }

    #[test]
    fn test_greedy_span_none_when_reversed() {
        assert_eq!(greedy_object_span("} {"), None);
        assert_eq!(greedy_object_span("no braces"), None);
    }

    #[tokio::test]
    async fn test_valid_reply_makes_no_repair_call() {
        let provider = ScriptedProvider::new(&[]);
        let mut messages = vec![PromptMessage::user("prompt")];

        let result = extract_with_repair(&provider, &mut messages, format!("Sure! {VALID}"), 1)
            .await
            .expect("should succeed");

        assert_eq!(result.summary, "x");
        assert_eq!(provider.call_count(), 0);
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_reply_repaired_once() {
        let provider = ScriptedProvider::new(&[VALID]);
        let mut messages = vec![PromptMessage::user("prompt")];

        let result = extract_with_repair(&provider, &mut messages, "oops".to_string(), 1)
            .await
            .expect("repair should succeed");

        assert_eq!(result.suggested_labels, vec!["bug", "ui"]);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].text.starts_with(REPAIR_INSTRUCTION));
        assert!(messages[1].text.ends_with("oops"));
    }

    #[tokio::test]
    async fn test_failed_repair_is_malformed_output_with_no_third_call() {
        let provider = ScriptedProvider::new(&["still not json"]);
        let mut messages = vec![PromptMessage::user("prompt")];

        let err = extract_with_repair(&provider, &mut messages, "oops".to_string(), 1)
            .await
            .expect_err("should fail");

        assert!(matches!(err, IssueLensError::MalformedOutput));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_repair_budget_fails_immediately() {
        let provider = ScriptedProvider::new(&[]);
        let mut messages = vec![PromptMessage::user("prompt")];

        let err = extract_with_repair(&provider, &mut messages, "oops".to_string(), 0)
            .await
            .expect_err("should fail");

        assert!(matches!(err, IssueLensError::MalformedOutput));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_configurable_repair_ceiling() {
        let provider = ScriptedProvider::new(&["bad 1", VALID]);
        let mut messages = vec![PromptMessage::user("prompt")];

        let result = extract_with_repair(&provider, &mut messages, "bad 0".to_string(), 2)
            .await
            .expect("second repair should succeed");

        assert_eq!(result.priority(), Some(2));
        assert_eq!(provider.call_count(), 2);
        assert_eq!(messages.len(), 3);
    }
}
