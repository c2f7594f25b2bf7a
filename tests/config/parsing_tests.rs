// Config parsing tests - the configuration shipped in config/ and the agent
// tree built from it.

#[path = "../support/mod.rs"]
mod support;

use assistant_core::agent::AgentDefinition;
use assistant_core::{Assistant, AssistantConfig, GeminiSettings};
use std::path::PathBuf;
use tempfile::tempdir;

fn shipped_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config")
}

#[test]
fn shipped_configuration_is_valid() {
    let config = AssistantConfig::load(&shipped_config_dir()).expect("load shipped config");

    assert_eq!(config.root.name, "root_agent");
    assert_eq!(config.search.name, "search_agent");
    assert_eq!(config.summarization.agent.name, "summarization_agent");
    assert_eq!(config.image.agent.name, "image_agent");
    assert!(config.summarization.summarization_prompt.ends_with('\n'));
    assert!(!config.image.example_prompt.is_empty());
}

#[test]
fn shipped_configuration_builds_the_agent_tree() {
    let config = AssistantConfig::load(&shipped_config_dir()).expect("load shipped config");
    let images = tempdir().expect("tempdir");
    let assistant = Assistant::from_gemini(
        &config,
        &GeminiSettings::default().with_api_key("test-key"),
        images.path(),
    );

    let root = assistant.root();
    assert_eq!(root.tools.names(), vec!["search_agent"]);
    let names: Vec<&str> = root.sub_agents.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["summarization_agent", "image_agent"]);

    let path = AgentDefinition::path_to(root, "image_agent").expect("image agent reachable");
    assert_eq!(path.len(), 2);
    assert!(
        path[1]
            .tools
            .names()
            .iter()
            .any(|name| *name == "generate_image")
    );
}
