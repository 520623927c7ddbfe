mod support;

use std::sync::Arc;

use support::{FakeBackend, MemoryTemplates, Scripted, ANALYSIS_TEMPLATE};
use verdict_chat::analysis::AnalysisOrchestrator;
use verdict_chat::error::ChatError;
use verdict_core::models::template::TemplateRole;

fn analyzer(backend: Arc<FakeBackend>, templates: MemoryTemplates) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(backend, Arc::new(templates))
}

#[tokio::test]
async fn analysis_parses_backend_reply() {
    let backend = Arc::new(FakeBackend::healthy());
    let sections = analyzer(backend.clone(), MemoryTemplates::all())
        .analyze("判決全文")
        .await
        .unwrap();

    assert_eq!(sections.title, "某甲訴某乙損害賠償");
    assert_eq!(sections.laws, "民法第184條、\n民法第195條");
    assert_eq!(backend.prompts().len(), 1);
}

#[tokio::test]
async fn analysis_prompt_contains_whole_document() {
    let backend = Arc::new(FakeBackend::healthy());
    let document = "判".repeat(9000);
    analyzer(backend.clone(), MemoryTemplates::all())
        .analyze(&document)
        .await
        .unwrap();

    let prompt = &backend.prompts()[0];
    assert!(prompt.starts_with(ANALYSIS_TEMPLATE));
    assert!(prompt.ends_with(&document));
}

#[tokio::test]
async fn blank_document_is_rejected_without_backend_call() {
    let backend = Arc::new(FakeBackend::healthy());
    let err = analyzer(backend.clone(), MemoryTemplates::all())
        .analyze(" \n\t ")
        .await
        .unwrap_err();

    assert!(matches!(err, ChatError::EmptyDocument));
    assert!(backend.prompts().is_empty());
}

#[tokio::test]
async fn missing_template_is_configuration_error() {
    let backend = Arc::new(FakeBackend::healthy());
    let err = analyzer(
        backend.clone(),
        MemoryTemplates::all().without(TemplateRole::Analysis),
    )
    .analyze("判決全文")
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ChatError::Configuration {
            role: TemplateRole::Analysis,
            ..
        }
    ));
    assert!(err.user_message().contains("prompt_template.txt"));
    assert!(backend.prompts().is_empty());
}

#[tokio::test]
async fn backend_failure_yields_placeholder_sections() {
    let backend = Arc::new(FakeBackend {
        analysis: Scripted::Fail,
        ..FakeBackend::healthy()
    });
    let sections = analyzer(backend, MemoryTemplates::all())
        .analyze("判決全文")
        .await
        .unwrap();

    assert_eq!(sections.title, "分析錯誤");
    assert!(sections.case_type.starts_with("⚠ 發生錯誤："));
    assert!(sections.case_type.contains("connection reset"));
    assert_eq!(sections.summary, "");
}

#[tokio::test]
async fn empty_reply_is_treated_like_failure() {
    let backend = Arc::new(FakeBackend {
        analysis: Scripted::Empty,
        ..FakeBackend::healthy()
    });
    let sections = analyzer(backend, MemoryTemplates::all())
        .analyze("判決全文")
        .await
        .unwrap();

    assert_eq!(sections.title, "分析錯誤");
    assert!(sections.case_type.contains("no text"));
}

#[tokio::test]
async fn reply_without_headers_yields_empty_sections() {
    let backend = Arc::new(FakeBackend {
        analysis: Scripted::text("抱歉，我無法分析這份文件。"),
        ..FakeBackend::healthy()
    });
    let sections = analyzer(backend, MemoryTemplates::all())
        .analyze("判決全文")
        .await
        .unwrap();

    assert!(sections.is_empty());
}
