//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod gemini;
mod system;

pub use chat::*;
pub use gemini::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BpmnChatConfig {
    pub gemini: GeminiSection,
    pub chat: ChatConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}
