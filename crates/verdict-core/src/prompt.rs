//! Prompt assembly for the three backend calls.
//!
//! All builders are pure string functions. The document excerpt is cut at a
//! hard character limit; the backend reply is never inspected here.

use crate::models::session::ChatTurn;

/// Default number of document characters included in follow-up and
/// suggestion prompts.
pub const DEFAULT_DOCUMENT_CAP: usize = 4000;

const USER_LABEL: &str = "使用者：";
const ASSISTANT_LABEL: &str = "AI：";
const DOCUMENT_LABEL: &str = "以下是判決書全文：";
const ANALYSIS_DOCUMENT_LABEL: &str = "判決書內容如下：";

/// Characters stripped from both ends of a suggested-question line.
const SUGGESTION_MARKERS: [char; 4] = ['•', '-', '●', '*'];

/// First `cap` characters of `text` (Unicode scalar values, not bytes).
pub fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Render prior turns as `使用者：…\nAI：…\n` blocks, oldest first.
pub fn render_history(history: &[ChatTurn]) -> String {
    let mut out = String::new();
    for turn in history {
        out.push_str(USER_LABEL);
        out.push_str(&turn.question);
        out.push('\n');
        out.push_str(ASSISTANT_LABEL);
        out.push_str(&turn.answer);
        out.push('\n');
    }
    out
}

/// Build the follow-up question prompt.
///
/// Layout: trimmed template, blank line, the labelled document excerpt,
/// blank line, prior turns, then the new question.
pub fn build_prompt(
    template: &str,
    document_text: &str,
    history: &[ChatTurn],
    question: &str,
    cap: usize,
) -> String {
    format!(
        "{}\n\n{DOCUMENT_LABEL}\n{}\n\n{}{USER_LABEL}{question}",
        template.trim(),
        truncate_chars(document_text, cap),
        render_history(history),
    )
}

/// Build the one-shot analysis prompt. The document is sent whole.
pub fn build_analysis_prompt(template: &str, document_text: &str) -> String {
    format!("{template}\n{ANALYSIS_DOCUMENT_LABEL}\n{document_text}")
}

/// Build the suggested-question prompt over the capped document.
pub fn build_suggestion_prompt(template: &str, document_text: &str, cap: usize) -> String {
    format!("{}\n\n{}", template.trim(), truncate_chars(document_text, cap))
}

/// Turn a raw suggestion reply into a clean list of questions.
///
/// One question per non-blank line, with list markers and surrounding
/// whitespace stripped. Lines that were nothing but markers are dropped.
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim_matches(|c: char| c.is_whitespace() || SUGGESTION_MARKERS.contains(&c)))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
