// Config loading tests - testing AssistantConfig::load error handling
//
// Every agent file is validated at load time, before any agent exists.

#[path = "../support/mod.rs"]
mod support;

use assistant_core::{AssistantConfig, ConfigError};
use std::path::Path;
use support::write_file;
use tempfile::tempdir;

const ROOT: &str = "name: root_agent\nmodel: gemini-2.0-flash\ndescriptions: root\ninstructions: route\n";
const SEARCH: &str = "name: search_agent\nmodel: gemini-2.0-flash\ndescriptions: search\ninstructions: search\n";
const SUMMARIZATION: &str = r#"
name: summarization_agent
model: gemini-2.0-flash
descriptions: summarize
instructions: summarize
summarization_prompt: "Summarize:\n"
"#;
const IMAGE: &str = r#"
name: image_agent
model: gemini-2.0-flash
descriptions: images
instructions: draw
image_model: imagen-3.0-generate-002
example_prompt: a lighthouse at dawn
"#;

fn write_all(dir: &Path, root: &str, search: &str, summarization: &str, image: &str) {
    write_file(dir, "root.yaml", root);
    write_file(dir, "search.yaml", search);
    write_file(dir, "summarization.yaml", summarization);
    write_file(dir, "image.yaml", image);
}

#[test]
fn loads_all_four_agents() {
    let dir = tempdir().expect("tempdir");
    write_all(dir.path(), ROOT, SEARCH, SUMMARIZATION, IMAGE);

    let config = AssistantConfig::load(dir.path()).expect("load config");
    assert_eq!(config.root.name, "root_agent");
    assert_eq!(config.search.name, "search_agent");
    assert_eq!(config.summarization.summarization_prompt, "Summarize:\n");
    assert_eq!(config.image.image_model, "imagen-3.0-generate-002");
}

#[test]
fn returns_error_when_directory_is_empty() {
    let dir = tempdir().expect("tempdir");
    let result = AssistantConfig::load(dir.path());
    match result {
        Err(ConfigError::NotFound { path }) => assert!(path.ends_with("root.yaml")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn returns_error_when_name_missing() {
    let dir = tempdir().expect("tempdir");
    let nameless = "model: gemini-2.0-flash\ndescriptions: search\ninstructions: search\n";
    write_all(dir.path(), ROOT, nameless, SUMMARIZATION, IMAGE);

    let result = AssistantConfig::load(dir.path());
    match result {
        Err(ConfigError::MissingField { path, field }) => {
            assert_eq!(field, "name");
            assert!(path.ends_with("search.yaml"));
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn returns_error_when_image_agent_lacks_example_prompt() {
    let dir = tempdir().expect("tempdir");
    let image = IMAGE.replace("example_prompt: a lighthouse at dawn\n", "");
    write_all(dir.path(), ROOT, SEARCH, SUMMARIZATION, &image);

    let err = AssistantConfig::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingField {
            field: "example_prompt",
            ..
        }
    ));
    assert!(err.user_message().contains("example_prompt"));
}

#[test]
fn returns_parse_error_for_invalid_yaml() {
    let dir = tempdir().expect("tempdir");
    write_all(dir.path(), "name: [unclosed\n", SEARCH, SUMMARIZATION, IMAGE);

    let err = AssistantConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
