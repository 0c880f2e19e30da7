//! Process startup: environment, logging and backend wiring.

use bpmn_chat_ai::{AiClient, GeminiClient, GeminiConfig, TurnHandler};
use bpmn_chat_config::schema::{GeminiSection, LogLevel, OutputConfig};
use bpmn_chat_view::{DiagramWriter, PageOptions};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- BPMN Chat crashed ---");
        eprintln!("Run again with RUST_LOG=bpmn_chat=debug and include the log when reporting.");
        eprintln!("-------------------------\n");

        default_hook(info);
    }));
}

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables that are already set win over the file.
pub fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/bpmn-chat-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            apply_dotenv(&contents, |key| std::env::var_os(key).is_some(), |key, value| {
                std::env::set_var(key, value)
            });
            return;
        }
    }
}

fn apply_dotenv(
    contents: &str,
    is_set: impl Fn(&str) -> bool,
    mut set: impl FnMut(&str, &str),
) {
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !key.is_empty() && !is_set(key) {
                set(key, value);
            }
        }
    }
}

/// Handle for adjusting the log filter once the config is known.
pub struct LogControl {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogControl {
    /// Switch to the configured level. A no-op when `RUST_LOG` was set.
    pub fn apply_level(&self, level: LogLevel) {
        let Some(ref handle) = self.reload else {
            return;
        };
        if let Err(e) = handle.reload(EnvFilter::new(level_directive(level))) {
            tracing::warn!("Failed to apply log level {}: {e}", level.as_directive());
        }
    }
}

fn level_directive(level: LogLevel) -> String {
    format!("bpmn_chat={}", level.as_directive())
}

/// Install the subscriber before anything else logs. `RUST_LOG` wins;
/// otherwise the default level applies until [`LogControl::apply_level`].
pub fn init_logging() -> LogControl {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            LogControl { reload: None }
        }
        Err(_) => {
            let initial = EnvFilter::new(level_directive(LogLevel::default()));
            let (filter, handle) = reload::Layer::new(initial);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            LogControl {
                reload: Some(handle),
            }
        }
    }
}

/// Resolve credentials into a backend. `None` means every turn will answer
/// with the configuration-error reply.
pub fn build_client(section: &GeminiSection) -> Option<Box<dyn AiClient>> {
    match GeminiConfig::from_env(&section.api_key_env) {
        Ok(config) => {
            let config = config
                .with_model(section.model.clone())
                .with_max_tokens(section.max_tokens)
                .with_temperature(section.temperature);
            Some(Box::new(GeminiClient::new(config)))
        }
        Err(e) => {
            tracing::warn!("Gemini backend unavailable: {e}");
            None
        }
    }
}

pub fn build_turn_handler(section: &GeminiSection) -> TurnHandler {
    let handler = TurnHandler::new(build_client(section), section.model.clone());
    tracing::info!(
        model = handler.model(),
        available = handler.backend_available(),
        "turn handler ready"
    );
    handler
}

pub fn build_writer(output: &OutputConfig) -> DiagramWriter {
    let mut writer = DiagramWriter::new(&output.html_path).with_options(PageOptions {
        title: output.title.clone(),
    });
    if let Some(ref xml_path) = output.xml_path {
        writer = writer.with_xml_path(xml_path);
    }
    writer
}
