//! Section parser for backend analysis replies.
//!
//! The backend is asked to answer with a fixed set of headed sections:
//!
//! ```text
//! ## 標題：民事損害賠償
//! ## 案件種類：民事
//! ## 案件概要：
//! ...
//! ```
//!
//! Nothing guarantees it complies, so parsing is header-driven rather than
//! order-driven. A single tokenizer pass finds every header marker
//! (`## `, a non-empty heading on one line, then the first full-width colon)
//! and the content up to the next marker. Known headings fill their field,
//! unknown ones are skipped together with their content, and the last
//! occurrence of a repeated heading wins.
//!
//! Header-like text inside a section body (say a quoted `## 附註：` line)
//! is indistinguishable from a real header and will split the section.
//! [`crate::context::format_sections`] does not escape it either.

use tracing::debug;

use crate::models::section::{ParsedSections, SectionLabel};

const MARKER: &str = "## ";
const COLON: char = '：';

/// A header marker located in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header<'a> {
    /// Byte offset of the leading `#`.
    start: usize,
    /// Byte offset just past the colon.
    end: usize,
    /// Text between `## ` and the colon.
    heading: &'a str,
}

/// Find the first header marker at or after byte offset `from`.
fn next_header(text: &str, mut from: usize) -> Option<Header<'_>> {
    while let Some(found) = text[from..].find(MARKER) {
        let start = from + found;
        let heading_start = start + MARKER.len();
        let line = match text[heading_start..].find('\n') {
            Some(newline) => &text[heading_start..heading_start + newline],
            None => &text[heading_start..],
        };
        if let Some(colon) = line.find(COLON)
            && colon > 0
        {
            return Some(Header {
                start,
                end: heading_start + colon + COLON.len_utf8(),
                heading: &line[..colon],
            });
        }
        // `#` is ASCII, so the next byte is a char boundary.
        from = start + 1;
    }
    None
}

/// Split `text` into `(heading, content)` pairs. Text before the first
/// header is dropped.
fn tokenize(text: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut current = next_header(text, 0);
    while let Some(header) = current {
        let next = next_header(text, header.end);
        let content_end = next.map_or(text.len(), |h| h.start);
        pairs.push((header.heading, &text[header.end..content_end]));
        current = next;
    }
    pairs
}

/// Parse a backend reply into [`ParsedSections`]. Never fails; anything
/// not found is left empty.
pub fn parse(raw: &str) -> ParsedSections {
    let mut sections = ParsedSections::default();

    for (heading, content) in tokenize(raw) {
        match SectionLabel::from_heading(heading) {
            Some(label) => sections.set(label, content.trim().to_string()),
            None => debug!(heading, "skipping unrecognized section header"),
        }
    }

    if !sections.laws.is_empty() {
        sections.laws = split_statute_list(&sections.laws);
    }

    sections
}

/// Display heuristic for the `laws` field: break the line after every `、`
/// and `，` so each cited statute renders on its own line.
///
/// This is lossy. A comma inside a sentence gets a line break too, since
/// nothing distinguishes it from a list separator. A separator already
/// followed by a line break is left alone, so applying this twice is the
/// same as applying it once.
pub fn split_statute_list(laws: &str) -> String {
    let mut out = String::with_capacity(laws.len() + laws.len() / 8);
    let mut chars = laws.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if (c == '、' || c == '，') && chars.peek() != Some(&'\n') {
            out.push('\n');
        }
    }
    out
}
