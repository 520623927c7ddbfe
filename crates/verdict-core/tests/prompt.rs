use verdict_core::models::session::ChatTurn;
use verdict_core::prompt::{
    build_analysis_prompt, build_prompt, build_suggestion_prompt, parse_suggestions,
    truncate_chars, DEFAULT_DOCUMENT_CAP,
};

fn turn(question: &str, answer: &str) -> ChatTurn {
    ChatTurn {
        question: question.to_string(),
        answer: answer.to_string(),
        asked_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

#[test]
fn truncate_counts_characters_not_bytes() {
    let text = "判".repeat(DEFAULT_DOCUMENT_CAP + 10);
    let cut = truncate_chars(&text, DEFAULT_DOCUMENT_CAP);
    assert_eq!(cut.chars().count(), DEFAULT_DOCUMENT_CAP);
}

#[test]
fn truncate_leaves_short_text_alone() {
    assert_eq!(truncate_chars("短文", DEFAULT_DOCUMENT_CAP), "短文");
}

#[test]
fn prompt_without_history() {
    let prompt = build_prompt("  請回答問題。\n", "判決全文", &[], "誰勝訴？", DEFAULT_DOCUMENT_CAP);
    assert_eq!(
        prompt,
        "請回答問題。\n\n以下是判決書全文：\n判決全文\n\n使用者：誰勝訴？"
    );
}

#[test]
fn prompt_renders_history_in_order() {
    let history = vec![turn("第一問", "第一答"), turn("第二問", "第二答")];
    let prompt = build_prompt("模板", "全文", &history, "第三問", DEFAULT_DOCUMENT_CAP);
    assert_eq!(
        prompt,
        "模板\n\n以下是判決書全文：\n全文\n\n\
         使用者：第一問\nAI：第一答\n\
         使用者：第二問\nAI：第二答\n\
         使用者：第三問"
    );
}

#[test]
fn prompt_document_is_capped() {
    let document = "x".repeat(DEFAULT_DOCUMENT_CAP * 2);
    let prompt = build_prompt("t", &document, &[], "q", DEFAULT_DOCUMENT_CAP);
    let included = prompt
        .split("以下是判決書全文：\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\n").next())
        .unwrap();
    assert_eq!(included.chars().count(), DEFAULT_DOCUMENT_CAP);
}

#[test]
fn analysis_prompt_keeps_full_document() {
    let document = "y".repeat(DEFAULT_DOCUMENT_CAP * 2);
    let prompt = build_analysis_prompt("分析模板", &document);
    assert!(prompt.starts_with("分析模板\n判決書內容如下：\n"));
    assert!(prompt.ends_with(&document));
}

#[test]
fn suggestion_prompt_is_capped() {
    let document = "z".repeat(DEFAULT_DOCUMENT_CAP + 1);
    let prompt = build_suggestion_prompt(" 建議模板 ", &document, DEFAULT_DOCUMENT_CAP);
    assert_eq!(prompt, format!("建議模板\n\n{}", "z".repeat(DEFAULT_DOCUMENT_CAP)));
}

#[test]
fn suggestions_strip_markers_and_blank_lines() {
    let raw = "\n• 被告為何敗訴？\n\n- 賠償金額如何計算？\n● 是否可以上訴？\n* **判決何時確定？**\n   \n";
    assert_eq!(
        parse_suggestions(raw),
        vec![
            "被告為何敗訴？",
            "賠償金額如何計算？",
            "是否可以上訴？",
            "判決何時確定？",
        ]
    );
}

#[test]
fn suggestions_never_empty_or_bulleted() {
    let raw = "---\n- \n•\n1. 第一題\n  - 第二題";
    let questions = parse_suggestions(raw);
    assert_eq!(questions, vec!["1. 第一題", "第二題"]);
    for q in &questions {
        assert!(!q.is_empty());
        assert!(!q.starts_with(['•', '-', '●', '*', ' ']));
    }
}
