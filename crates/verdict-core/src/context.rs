//! Context formatter for follow-up prompts.
//!
//! Re-serializes a [`ParsedSections`] record into the same header-delimited
//! shape the backend produced, so a cached analysis can be replayed into a
//! later prompt in place of the raw reply.

use crate::models::section::{ParsedSections, SectionLabel};

/// Render `sections` as `## <heading>：` blocks in canonical order.
///
/// Title and case type are short and sit on the header line; the remaining
/// sections start on the line after their header.
pub fn format_sections(sections: &ParsedSections) -> String {
    sections
        .iter()
        .map(|(label, value)| match label {
            SectionLabel::Title | SectionLabel::CaseType => {
                format!("## {}：{value}", label.heading())
            }
            _ => format!("## {}：\n{value}", label.heading()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
