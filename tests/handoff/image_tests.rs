// Image hand-off tests
//
// The image agent enhances a description, generates one image, writes it to
// the image directory and records it in the session's image slot.

#[path = "../support/mod.rs"]
mod support;

use assistant_core::Assistant;
use assistant_core::agent::AgentOptions;
use assistant_core::artifacts::ArtifactStore;
use std::fs;
use support::{FixedImages, ScriptedProvider, assistant_config, backends};
use tempfile::tempdir;

const TO_IMAGE_AGENT: &str = r#"{"action":"transfer","agent":"image_agent"}"#;
const ENHANCE: &str = r#"{"action":"call_tool","tool":"enhance_prompt","input":{"desc":"a fox in the snow"}}"#;
const ENHANCED: &str = "A red fox standing in fresh snow, golden hour light, shallow depth of field";
const GENERATE: &str = r#"{"action":"call_tool","tool":"generate_image","input":{"prompt":"A red fox standing in fresh snow, golden hour light, shallow depth of field"}}"#;

#[tokio::test]
async fn generated_png_is_saved_and_recorded() {
    let dir = tempdir().expect("tempdir");
    let image_dir = dir.path().join("images");
    let provider = ScriptedProvider::new(&[
        TO_IMAGE_AGENT,
        ENHANCE,
        ENHANCED,
        GENERATE,
        r#"{"action":"final","response":"Your fox is ready."}"#,
    ]);
    let (backends, artifacts) = backends(&provider, FixedImages::png(), &image_dir);
    let assistant = Assistant::build(&assistant_config(), backends);

    let outcome = assistant
        .run("draw a fox in the snow", AgentOptions::default().with_session("fox"))
        .await
        .expect("run succeeds");
    assert_eq!(outcome.agent, "image_agent");

    let enhance = &outcome.steps[1];
    assert_eq!(enhance.output["enhanced_prompt"], ENHANCED);
    let enhancer = provider.requests_for("enhancer-model");
    assert!(enhancer[0].messages[0].content.contains("A lighthouse at dawn, oil painting"));

    let generate = &outcome.steps[2];
    assert!(generate.success);
    let filename = generate.output["filename"].as_str().expect("filename");
    assert!(filename.ends_with(".png"));
    assert_eq!(generate.output["artifact_version"], 0);
    assert!(image_dir.join(filename).is_file());

    let session = assistant.sessions().open(Some("fox")).await;
    let session = session.lock().await;
    let recorded = session.state.image_artifact.as_ref().expect("image slot");
    assert_eq!(recorded.filename, filename);
    assert_eq!(recorded.mime_type, "image/png");

    let artifact = artifacts
        .load("fox", filename, None)
        .await
        .expect("artifact lookup")
        .expect("artifact saved");
    assert_eq!(artifact.data, b"\x89PNG\r\n\x1a\n".to_vec());
}

#[tokio::test]
async fn rejected_generation_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let image_dir = dir.path().join("images");
    let provider = ScriptedProvider::new(&[
        TO_IMAGE_AGENT,
        GENERATE,
        r#"{"action":"final","response":"The image could not be generated."}"#,
    ]);
    let (backends, artifacts) = backends(&provider, FixedImages::rejecting(), &image_dir);
    let assistant = Assistant::build(&assistant_config(), backends);

    let outcome = assistant
        .run("draw a fox", AgentOptions::default().with_session("blocked"))
        .await
        .expect("run succeeds");

    let generate = &outcome.steps[1];
    assert!(!generate.success);
    assert!(generate.output.get("error").is_some());
    assert!(generate.output.get("filename").is_none());

    let written = fs::read_dir(&image_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(written, 0);
    assert!(artifacts.list("blocked").await.unwrap().is_empty());

    let session = assistant.sessions().open(Some("blocked")).await;
    assert!(session.lock().await.state.image_artifact.is_none());
}
