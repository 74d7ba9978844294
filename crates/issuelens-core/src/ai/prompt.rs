// SPDX-License-Identifier: Apache-2.0

//! Prompt construction for issue analysis.
//!
//! The rendered prompt describes the exact JSON schema that
//! [`super::extract`] expects back, so the two must change together.

use std::borrow::Cow;
use std::fmt::Write;

use super::types::IssueRecord;

/// Maximum issue body length (in characters) included in the prompt.
pub const MAX_BODY_LENGTH: usize = 4096;

/// Maximum number of comments included in the prompt.
pub const MAX_COMMENTS: usize = 10;

/// Maximum length (in characters) of each included comment.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Marker appended to truncated text.
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Placeholder rendered when the issue has no comments.
pub const NO_COMMENTS_PLACEHOLDER: &str = "No comments on this issue yet.";

/// Placeholder rendered when the issue body is empty.
pub const EMPTY_BODY_PLACEHOLDER: &str = "[No description provided]";

/// Cuts `text` to `max_chars` characters and appends [`TRUNCATION_MARKER`].
///
/// Text at or under the limit is returned unchanged. Counts characters,
/// not bytes, so multi-byte UTF-8 is never split.
#[must_use]
pub fn truncate_with_marker(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &text[..cut])),
    }
}

/// Renders the comment section: a numbered list or the placeholder.
fn render_comments(comments: &[String]) -> String {
    if comments.is_empty() {
        return NO_COMMENTS_PLACEHOLDER.to_string();
    }

    let mut block = String::from("Comments from other users:\n");
    for (i, comment) in comments.iter().take(MAX_COMMENTS).enumerate() {
        let _ = writeln!(
            block,
            "  {}. {}",
            i + 1,
            truncate_with_marker(comment, MAX_COMMENT_LENGTH)
        );
    }
    block
}

/// Builds the analysis prompt for an issue.
///
/// Pure and deterministic: the same record always yields the same string.
#[must_use]
pub fn build_prompt(issue: &IssueRecord) -> String {
    let title = &issue.title;
    let body = if issue.body.is_empty() {
        Cow::Borrowed(EMPTY_BODY_PLACEHOLDER)
    } else {
        truncate_with_marker(&issue.body, MAX_BODY_LENGTH)
    };
    let comments = render_comments(&issue.comments);

    format!(
        r#"You are an expert GitHub issue analyzer. Your task is to analyze GitHub issues and provide structured insights that help maintainers and contributors understand and prioritize issues effectively.

You will receive:
1. Issue title
2. Issue body/description (may be empty or very long)
3. Comments from other users (may be empty)

Your job is to analyze all this information and respond with ONLY a valid JSON object using exactly this schema (no markdown, no preamble, just pure JSON):

{{
  "summary": "A concise one-sentence summary of the main problem, feature request, or question.",
  "type": "bug | feature_request | documentation | question | other",
  "priority_score": "A number from 1 (low priority) to 5 (critical priority), followed by a brief justification (1-2 sentences).",
  "suggested_labels": ["label1", "label2", "label3"],
  "potential_impact": "A brief 1-2 sentence description of the potential impact on users if this is a bug, or value added if it's a feature."
}}

Guidelines:
- "summary" must be exactly ONE sentence
- "type" must be one of: bug, feature_request, documentation, question, other
- "priority_score" format: "X - [justification]" where X is 1-5
- "suggested_labels" should be 2-4 relevant GitHub labels (standard ones like "bug", "enhancement", "good first issue", "help wanted", etc.)
- "potential_impact" should be practical and user-focused

Example:
Input:
  Title: TypeError when calling updateProfile without authentication
  Body: When I call updateProfile() while not authenticated, the app throws a TypeError and crashes.
  Comments: User 1: "Same issue here on v2.1" | User 2: "This is blocking our release"

Output (pure JSON, nothing else):
{{
  "summary": "Calling updateProfile without authentication causes a TypeError crash.",
  "type": "bug",
  "priority_score": "4 - Users experience app crash; blocks release; needs urgent fix.",
  "suggested_labels": ["bug", "crash", "authentication"],
  "potential_impact": "Users without authentication cannot use the app and experience complete failure; data integrity at risk."
}}

---

Now analyze this GitHub issue:

Title: {title}

Body:
{body}

{comments}

Return ONLY the JSON object, no other text."#
    )
}
