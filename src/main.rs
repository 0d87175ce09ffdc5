use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quick_translate_bot::{ApiServer, ApiState, Config, TelegramClient};

/// Quick Translate Bot - Telegram webhook translator
#[derive(Parser)]
#[command(name = "quick-translate-bot", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "QUICK_TRANSLATE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the webhook endpoint (default)
    Serve,
    /// Register the webhook URL with Telegram
    SetWebhook {
        /// Public URL of the `/bot/webhook` endpoint
        url: String,
    },
    /// Remove the webhook registration
    DeleteWebhook,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,quick_translate_bot=info",
        1 => "info,quick_translate_bot=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::SetWebhook { url } => {
            telegram(&config)?
                .set_webhook(&url, &config.telegram.secret_token)
                .await?;
            Ok(())
        }
        Command::DeleteWebhook => {
            telegram(&config)?.delete_webhook().await?;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        port = config.server.port,
        group = config.telegram.enable_group,
        bot_username = ?config.telegram.bot_username,
        max_time_difference = config.telegram.max_time_difference,
        "starting quick translate bot"
    );

    let state = ApiState::from_config(&config)?;
    ApiServer::new(state, config.server.port).run().await?;
    Ok(())
}

fn telegram(config: &Config) -> anyhow::Result<TelegramClient> {
    Ok(TelegramClient::new(
        config.telegram.bot_token.clone(),
        config.http_client()?,
        config.telegram.api_url.clone(),
    ))
}
