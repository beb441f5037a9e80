mod cli;

use std::process::ExitCode;

use argo_assistant::select_response;
use argo_chat::error::{ChatError, ChatResult};
use argo_chat::settings::{ChatSettings, SettingsStore};
use argo_chat::terminal::run_interactive;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("argo-chat failed: {error}");
            eprintln!("{}", snafu::Report::from_error(error));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ChatResult<()> {
    let store = match cli.config {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::load(),
    };

    match cli.command {
        None | Some(Commands::Chat) => run_interactive(store.settings()).await,
        Some(Commands::Ask { prompt }) => {
            let prompt = prompt.join(" ");
            if prompt.trim().is_empty() {
                tracing::debug!("ignoring blank one-shot prompt");
                return Ok(());
            }
            println!("{}", select_response(&prompt).content);
            Ok(())
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                println!("# {}", store.config_path().display());
                let json = store
                    .settings()
                    .to_pretty_json()
                    .map_err(|source| ChatError::Settings {
                        stage: "config-show",
                        source,
                    })?;
                println!("{json}");
                Ok(())
            }
            ConfigAction::Init { force } => init_config(&store, force),
        },
    }
}

fn init_config(store: &SettingsStore, force: bool) -> ChatResult<()> {
    if store.config_path().exists() && !force {
        println!(
            "Settings already exist at {}; pass --force to overwrite.",
            store.config_path().display()
        );
        return Ok(());
    }

    store
        .update(ChatSettings::default())
        .map_err(|source| ChatError::Settings {
            stage: "config-init",
            source,
        })?;
    println!("Wrote default settings to {}", store.config_path().display());
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Logs go to stderr so the conversation on stdout stays readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
