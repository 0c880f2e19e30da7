mod boot;
mod chat_loop;

fn main() {
    // Load .env file before anything else
    boot::load_dotenv();

    boot::install_panic_hook();

    let logging = boot::init_logging();

    tracing::info!("BPMN Chat v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = bpmn_chat_config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        bpmn_chat_config::BpmnChatConfig::default()
    });
    logging.apply_level(config.logging.level);
    tracing::debug!("effective config: {}", bpmn_chat_config::config_to_json(&config));

    let handler = boot::build_turn_handler(&config.gemini);
    let writer = boot::build_writer(&config.output);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    println!("{}\n", config.chat.greeting);
    if let Err(e) = runtime.block_on(chat_loop::run(handler, writer)) {
        tracing::error!("Chat loop ended with error: {e}");
    }
    tracing::info!("Shutdown complete");
}
