//! Telegram webhook administration tool.
//!
//! Registers, inspects and deletes the bot's webhook using the same
//! environment (or `.env` file) as the server. Only `BOT_TOKEN` is needed,
//! except for `set`, which also needs `WEBHOOK_URL` and `TG_WEBHOOK_SECRET`:
//!
//! ```text
//! tgingest-webhook set      # register WEBHOOK_URL with TG_WEBHOOK_SECRET
//! tgingest-webhook info     # show the current registration (default)
//! tgingest-webhook delete   # remove the registration
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tgingest::admin::{BotApiClient, WebhookInfo, DEFAULT_API_BASE};
use tgingest::AdminConfig;

#[derive(Parser)]
#[command(name = "tgingest-webhook", about = "Manage the Telegram webhook registration")]
struct Cli {
    /// Bot API base URL
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Register WEBHOOK_URL as the webhook
    Set,
    /// Show the current webhook registration
    Info,
    /// Delete the webhook registration
    Delete,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AdminConfig::from_env().context("Invalid configuration")?;
    let client = BotApiClient::with_api_base(config.bot_token.clone(), cli.api_base)
        .context("Failed to create HTTP client")?;

    match cli.command.unwrap_or(Command::Info) {
        Command::Set => set_webhook(&client, &config).await,
        Command::Info => show_webhook_info(&client).await,
        Command::Delete => delete_webhook(&client, &config).await,
    }
}

async fn set_webhook(client: &BotApiClient, config: &AdminConfig) -> Result<()> {
    let (url, secret) = config
        .registration()
        .context("Cannot register the webhook")?;

    println!("Setting webhook to: {}", url);

    client
        .set_webhook(
            url,
            secret,
            config.webhook_drop_pending,
            config.webhook_max_connections,
        )
        .await
        .context("Failed to set webhook")?;

    println!("Webhook set successfully");
    Ok(())
}

async fn show_webhook_info(client: &BotApiClient) -> Result<()> {
    println!("Getting webhook info...");

    let info = client
        .webhook_info()
        .await
        .context("Failed to get webhook info")?;

    print!("{}", render_info(&info));
    Ok(())
}

async fn delete_webhook(client: &BotApiClient, config: &AdminConfig) -> Result<()> {
    println!("Deleting webhook...");

    client
        .delete_webhook(config.webhook_drop_pending)
        .await
        .context("Failed to delete webhook")?;

    println!("Webhook deleted successfully");
    Ok(())
}

fn render_info(info: &WebhookInfo) -> String {
    let url = if info.url.is_empty() {
        "(not set)"
    } else {
        info.url.as_str()
    };
    let allowed = match &info.allowed_updates {
        Some(updates) if !updates.is_empty() => updates.join(", "),
        _ => "(all)".to_string(),
    };

    format!(
        "Webhook URL: {}\n  Pending updates: {}\n  Last error: {}\n  Allowed updates: {}\n",
        url,
        info.pending_update_count,
        info.last_error_message.as_deref().unwrap_or("(none)"),
        allowed,
    )
}
