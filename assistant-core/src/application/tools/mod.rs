//! Built-in tools.
//!
//! | tool                 | reads slot | writes slot      |
//! |----------------------|------------|------------------|
//! | `load_text`          |            | `document`       |
//! | `load_weblink`       |            | `document`       |
//! | `load_file`          | `document_path` | `document`  |
//! | `summarize_document` | `document` |                  |
//! | `enhance_prompt`     |            |                  |
//! | `generate_image`     |            | `image_artifact` |
//! | `google_search`      |            |                  |

mod agent_tool;
mod documents;
mod image;
mod search;
mod summarize;

pub use agent_tool::AgentTool;
pub use documents::{LoadFileTool, LoadTextTool, LoadWeblinkTool};
pub use image::{EnhancePromptTool, GenerateImageTool, enhancement_prompt};
pub use search::GoogleSearchTool;
pub use summarize::SummarizeDocumentTool;

#[cfg(test)]
pub(crate) mod test_support;
