mod cli;
mod render;
mod repl;
mod reveal;
mod scroll;

use std::process::ExitCode;
use std::sync::Arc;

use lifeos_ai::{AiClient, ClientFactory, ContextStore, GeminiClient, GeminiConfig, SessionGateway};
use lifeos_chat::Orchestrator;
use lifeos_common::{LifeOsError, Result};
use lifeos_config::schema::{LifeOsConfig, ModelConfig};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- Life OS Debugger crashed ---");
        eprintln!("Run with --log-level debug and include the log when reporting this.");
        eprintln!("--------------------------------\n");

        default_hook(info);
    }));
}

/// KEY=VALUE pairs of a .env file. Blank lines and `#` comments are skipped;
/// surrounding quotes are stripped from values.
fn dotenv_pairs(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim(), value)
        })
        .collect()
}

/// Load environment variables from a .env file. Variables already set in the
/// environment win. Must run before any other thread exists.
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/lifeos-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in dotenv_pairs(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

fn init_logging(directive: &str) {
    let fallback = "lifeos=info";
    let directive: std::result::Result<Directive, _> = directive.parse().or_else(|_| fallback.parse());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the Gemini client when the gateway first needs it.
fn client_factory(model: ModelConfig) -> ClientFactory {
    Box::new(move || {
        let config = GeminiConfig::from_env(model.api_key_env.as_slice())?
            .with_model(model.name.as_str())
            .with_temperature(model.temperature)
            .with_max_tokens(model.max_tokens);
        let client = GeminiClient::new(config)?;
        tracing::info!(model = client.model(), "Gemini client ready");
        Ok(Arc::new(client) as Arc<dyn AiClient>)
    })
}

fn main() -> ExitCode {
    // set_var is only sound while the process is single-threaded.
    load_dotenv();
    install_panic_hook();

    let args = cli::parse();
    let result = tokio::runtime::Runtime::new()
        .map_err(LifeOsError::from)
        .and_then(|runtime| runtime.block_on(run(args)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> Result<()> {
    let loaded = lifeos_config::load_config(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    let directive = args
        .log_directive()
        .unwrap_or_else(|| level.as_directive().to_string());
    init_logging(&directive);

    tracing::info!("Life OS Debugger v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => return Err(e.into()),
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            LifeOsConfig::default()
        }
    };
    if args.stream {
        config.display.stream = true;
    }
    if args.no_reveal {
        config.display.reveal_ms = 0;
    }

    if args.print_config {
        println!("{}", lifeos_config::config_to_json(&config));
        return Ok(());
    }
    tracing::info!(model = %config.model.name, "Config loaded");

    let mut gateway = SessionGateway::new(
        Arc::new(ContextStore::new()),
        client_factory(config.model.clone()),
    );
    if let Some(instruction) = config.model.system_instruction.clone() {
        gateway = gateway.with_system_instruction(instruction);
    }

    let orch = Arc::new(Orchestrator::new(gateway, config.session.clone()));
    if let Err(e) = orch.ensure_active_session().await {
        tracing::warn!("Remote model unavailable: {e}");
        eprintln!(
            "warning: {e}. Set one of {} to talk to the debugger.",
            config.model.api_key_env.join(", ")
        );
    }

    repl::Repl::new(orch, config.display.clone()).run().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_pairs_skip_comments_and_strip_quotes() {
        let contents = "# key\nGEMINI_API_KEY=\"abc\"\n\n  API_KEY = 'xyz'  \nnot a pair\n";
        assert_eq!(
            dotenv_pairs(contents),
            vec![("GEMINI_API_KEY", "abc"), ("API_KEY", "xyz")]
        );
    }
}
