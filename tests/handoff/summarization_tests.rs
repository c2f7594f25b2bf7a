// Summarization hand-off tests
//
// Documents loaded by one tool call reach the summarizer of a later call
// through the session state, across the full agent tree.

#[path = "../support/mod.rs"]
mod support;

use assistant_core::Assistant;
use assistant_core::agent::{AgentOptions, StepKind};
use support::{FixedImages, SUMMARY_PROMPT, ScriptedProvider, assistant_config, backends, write_file};
use tempfile::tempdir;

const TO_SUMMARIZER: &str = r#"{"action":"transfer_to_agent","agent":"summarization_agent"}"#;
const SUMMARIZE: &str = r#"{"action":"call_tool","tool":"summarize_document","input":{}}"#;

fn assistant(provider: &ScriptedProvider, image_dir: &std::path::Path) -> Assistant {
    let (backends, _) = backends(provider, FixedImages::rejecting(), image_dir);
    Assistant::build(&assistant_config(), backends)
}

#[tokio::test]
async fn summarize_without_loading_reports_missing_document() {
    let dir = tempdir().expect("tempdir");
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        SUMMARIZE,
        r#"{"action":"final","response":"Please share a document first."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());

    let outcome = assistant
        .run("summarize my document", AgentOptions::default())
        .await
        .expect("run succeeds");

    assert_eq!(outcome.agent, "summarization_agent");
    assert_eq!(outcome.steps[0].kind, StepKind::Transfer);
    let step = &outcome.steps[1];
    assert!(!step.success);
    assert_eq!(step.output["error"], "No document found in session state.");
    assert!(step.output.get("summary").is_none());
    assert!(step.output.get("document").is_none());
    assert!(provider.requests_for("summarizer-model").is_empty());
}

#[tokio::test]
async fn loaded_text_is_appended_to_the_summarization_prompt() {
    let dir = tempdir().expect("tempdir");
    let text = "The borrow checker enforces aliasing rules at compile time.";
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        r#"{"action":"call_tool","tool":"load_text","input":{"text":"The borrow checker enforces aliasing rules at compile time."}}"#,
        SUMMARIZE,
        r#"{"topic":"borrow checker","points":["aliasing","compile time"]}"#,
        r#"{"action":"final","response":"The text explains the borrow checker."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());

    let outcome = assistant
        .run("summarize this text", AgentOptions::default())
        .await
        .expect("run succeeds");

    let summarizer = provider.requests_for("summarizer-model");
    assert_eq!(summarizer.len(), 1);
    assert_eq!(summarizer[0].messages.len(), 1);
    assert_eq!(summarizer[0].messages[0].content, format!("{SUMMARY_PROMPT}{text}"));
    assert_eq!(summarizer[0].options.temperature, Some(0.0));

    let summary_step = outcome.steps.last().expect("summary step");
    assert!(summary_step.success);
    assert_eq!(summary_step.output["summary"]["topic"], "borrow checker");
}

#[tokio::test]
async fn second_load_replaces_the_first() {
    let dir = tempdir().expect("tempdir");
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        r#"{"action":"call_tool","tool":"load_text","input":{"text":"first draft"}}"#,
        r#"{"action":"call_tool","tool":"load_text","input":{"text":"final draft"}}"#,
        SUMMARIZE,
        r#"{"summary":"final"}"#,
        r#"{"action":"final","response":"Done."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());

    assistant
        .run("summarize", AgentOptions::default())
        .await
        .expect("run succeeds");

    let summarizer = provider.requests_for("summarizer-model");
    let sent = &summarizer[0].messages[0].content;
    assert_eq!(sent, &format!("{SUMMARY_PROMPT}final draft"));
    assert!(!sent.contains("first draft"));
}

#[tokio::test]
async fn document_persists_into_the_next_turn_of_the_session() {
    let dir = tempdir().expect("tempdir");
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        r#"{"action":"call_tool","tool":"load_weblink","input":{"url":"https://blog.rust-lang.org/2025/02/20/Rust-1.85.0.html"}}"#,
        r#"{"action":"final","response":"Page loaded. Want a summary?"}"#,
        SUMMARIZE,
        r#"{"summary":"Rust 2024 is stable."}"#,
        r#"{"action":"final","response":"Rust 2024 is stable."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());
    let options = AgentOptions::default().with_session("conversation-1");

    let first = assistant
        .run("load the Rust 1.85 release post", options.clone())
        .await
        .expect("first run");
    assert_eq!(first.agent, "summarization_agent");

    let second = assistant
        .run("yes please", options)
        .await
        .expect("second run");
    assert_eq!(second.agent, "summarization_agent");
    let step = &second.steps[0];
    assert_eq!(
        step.output["source"],
        "https://blog.rust-lang.org/2025/02/20/Rust-1.85.0.html"
    );

    let summarizer = provider.requests_for("summarizer-model");
    assert_eq!(
        summarizer[0].messages[0].content,
        format!("{SUMMARY_PROMPT}Rust 1.85 stabilizes the 2024 edition.")
    );
}

#[tokio::test]
async fn failed_fetch_is_reported_to_the_agent() {
    let dir = tempdir().expect("tempdir");
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        r#"{"action":"call_tool","tool":"load_weblink","input":{"url":"https://example.com/missing"}}"#,
        r#"{"action":"final","response":"I could not open that page."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());

    let outcome = assistant
        .run("summarize https://example.com/missing", AgentOptions::default())
        .await
        .expect("run succeeds");

    let step = &outcome.steps[1];
    assert!(!step.success);
    assert!(step.output["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn attached_document_is_loaded_and_summarized() {
    let dir = tempdir().expect("tempdir");
    let upload = write_file(dir.path(), "notes.txt", "Meeting notes: ship on Friday.");
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        r#"{"action":"call_tool","tool":"load_file","input":{}}"#,
        SUMMARIZE,
        r#"{"summary":"Ship on Friday."}"#,
        r#"{"action":"final","response":"Ship on Friday."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());

    assistant.attach_document("upload", &upload).await;

    let outcome = assistant
        .run("summarize the file I uploaded", AgentOptions::default().with_session("upload"))
        .await
        .expect("run succeeds");

    assert!(outcome.steps[1].success);
    let summarizer = provider.requests_for("summarizer-model");
    assert_eq!(
        summarizer[0].messages[0].content,
        format!("{SUMMARY_PROMPT}Meeting notes: ship on Friday.")
    );
}

#[tokio::test]
async fn pdf_upload_is_reported_as_unsupported() {
    let dir = tempdir().expect("tempdir");
    let upload = write_file(dir.path(), "report.pdf", "%PDF-1.7");
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        r#"{"action":"call_tool","tool":"load_file","input":{}}"#,
        r#"{"action":"final","response":"PDF files are not supported yet."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());
    assistant.attach_document("pdf", &upload).await;

    let outcome = assistant
        .run("summarize my report", AgentOptions::default().with_session("pdf"))
        .await
        .expect("run succeeds");

    assert!(!outcome.steps[1].success);
    assert!(outcome.steps[1].output["error"].as_str().unwrap().contains("pdf"));
}

#[tokio::test]
async fn load_file_cannot_read_a_path_chosen_by_the_model() {
    let dir = tempdir().expect("tempdir");
    let secret = write_file(dir.path(), ".env", "GOOGLE_API_KEY=super-secret");
    let call = format!(
        r#"{{"action":"call_tool","tool":"load_file","input":{{"path":"{}"}}}}"#,
        secret.display()
    );
    let provider = ScriptedProvider::new(&[
        TO_SUMMARIZER,
        call.as_str(),
        SUMMARIZE,
        r#"{"action":"final","response":"Nothing to summarize."}"#,
    ]);
    let assistant = assistant(&provider, dir.path());

    let outcome = assistant
        .run("summarize the file at that path", AgentOptions::default().with_session("inject"))
        .await
        .expect("run succeeds");

    assert!(!outcome.steps[1].success);
    assert!(!outcome.steps[2].success);
    assert!(provider.requests_for("summarizer-model").is_empty());
    let leaked = provider
        .requests()
        .iter()
        .any(|request| request.messages.iter().any(|m| m.content.contains("super-secret")));
    assert!(!leaked);
}
