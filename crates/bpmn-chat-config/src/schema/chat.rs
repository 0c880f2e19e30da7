//! Chat shell and output settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GREETING: &str = "Hello! I can help you design business processes by creating BPMN diagrams.\n\n\
How to use:\n\
1. Generate BPMN diagrams: describe your business process and I'll create a BPMN diagram\n\
2. Modify diagrams: once you have a diagram, ask me to make specific changes\n\n\
Type /new to start over, /quit to exit.";

/// `[chat]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.into(),
        }
    }
}

/// `[output]` section: where the rendered diagram is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Standalone HTML page with the bpmn-js modeler.
    pub html_path: String,
    /// Optional raw BPMN XML dump of the current document.
    pub xml_path: Option<String>,
    /// Page title.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html_path: "bpmn-diagram.html".into(),
            xml_path: None,
            title: "BPMN Chatbot".into(),
        }
    }
}
