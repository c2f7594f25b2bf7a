mod error;
mod interface;
mod registry;

pub use error::ToolError;
pub use interface::{Tool, ToolDescriptor, optional_str, required_str};
pub use registry::ToolRegistry;
