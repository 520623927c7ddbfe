use serde::{Deserialize, Serialize};

/// One of the seven canonical fields of a judgment analysis.
///
/// The variant order is the canonical order in which the backend is asked
/// to emit sections and in which [`crate::context::format_sections`]
/// writes them back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Title,
    CaseType,
    Summary,
    Claims,
    Laws,
    Result,
    Reason,
}

impl SectionLabel {
    /// All labels, in canonical order.
    pub const ALL: [SectionLabel; 7] = [
        SectionLabel::Title,
        SectionLabel::CaseType,
        SectionLabel::Summary,
        SectionLabel::Claims,
        SectionLabel::Laws,
        SectionLabel::Result,
        SectionLabel::Reason,
    ];

    /// The heading text that appears between `## ` and `：` in model output.
    pub fn heading(self) -> &'static str {
        match self {
            SectionLabel::Title => "標題",
            SectionLabel::CaseType => "案件種類",
            SectionLabel::Summary => "案件概要",
            SectionLabel::Claims => "原告請求賠償",
            SectionLabel::Laws => "適用法律",
            SectionLabel::Result => "判決結果",
            SectionLabel::Reason => "判決理由",
        }
    }

    /// Resolve a heading by exact match. No trimming, no fuzzy matching.
    pub fn from_heading(heading: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.heading() == heading)
    }
}

/// The structured record extracted from a backend analysis reply.
///
/// Every label always has a value; a section absent from the source text is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSections {
    pub title: String,
    pub case_type: String,
    pub summary: String,
    pub claims: String,
    pub laws: String,
    pub result: String,
    pub reason: String,
}

impl ParsedSections {
    pub fn get(&self, label: SectionLabel) -> &str {
        match label {
            SectionLabel::Title => &self.title,
            SectionLabel::CaseType => &self.case_type,
            SectionLabel::Summary => &self.summary,
            SectionLabel::Claims => &self.claims,
            SectionLabel::Laws => &self.laws,
            SectionLabel::Result => &self.result,
            SectionLabel::Reason => &self.reason,
        }
    }

    pub fn set(&mut self, label: SectionLabel, value: String) {
        let slot = match label {
            SectionLabel::Title => &mut self.title,
            SectionLabel::CaseType => &mut self.case_type,
            SectionLabel::Summary => &mut self.summary,
            SectionLabel::Claims => &mut self.claims,
            SectionLabel::Laws => &mut self.laws,
            SectionLabel::Result => &mut self.result,
            SectionLabel::Reason => &mut self.reason,
        };
        *slot = value;
    }

    /// Iterate `(label, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionLabel, &str)> {
        SectionLabel::ALL.into_iter().map(|label| (label, self.get(label)))
    }

    /// Record shown in place of an analysis when the backend could not
    /// produce one. The failure description lands in `case_type` so it is
    /// visible wherever the record is rendered.
    pub fn analysis_failed(description: &str) -> Self {
        Self {
            title: "分析錯誤".to_string(),
            case_type: format!("⚠ 發生錯誤：{description}"),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, value)| value.is_empty())
    }
}
