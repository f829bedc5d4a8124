//! Campaign daemon: entry point for the proof-code campaign bot.

mod config;
mod console;
mod shutdown;
mod surfaces;

use anyhow::Context;
use campaign_commands::{Channel, ChatFrontend, Replies};
use campaign_crypto::{Eip55Validator, OsCodeGenerator};
use campaign_enrollment::{Collaborators, EnrollmentWorkflow};
use campaign_rpc::RpcServer;
use campaign_social::XApiClient;
use campaign_store_json::JsonFileStore;
use campaign_types::{AccountId, SystemClock};
use campaign_utils::LogFormat;
use clap::Parser;
use config::BotConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "campaign-daemon", about = "Proof-code campaign bot")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "CAMPAIGN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the subscription document.
    #[arg(long, env = "CAMPAIGN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// HTTP API port.
    #[arg(long, env = "CAMPAIGN_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Allowed CORS origins (comma-separated).
    #[arg(long, env = "CAMPAIGN_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Campaign start instant, RFC 3339.
    #[arg(long, env = "CAMPAIGN_START")]
    campaign_start: Option<String>,

    /// Social platform API root.
    #[arg(long, env = "CAMPAIGN_X_API_BASE_URL")]
    x_api_base_url: Option<String>,

    /// Social platform bearer token.
    #[arg(long, env = "CAMPAIGN_X_BEARER_TOKEN", hide_env_values = true)]
    x_bearer_token: Option<String>,

    /// Guild channel the bot answers in.
    #[arg(long, env = "CAMPAIGN_ALLOWED_CHANNEL")]
    allowed_channel: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CAMPAIGN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CAMPAIGN_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the HTTP API until SIGINT/SIGTERM.
    Serve,
    /// Drive the chat commands from stdin; replies go to stdout.
    Console {
        /// Account id the console messages come from.
        #[arg(long, default_value = "console")]
        account: String,
        /// Post in this guild channel instead of a direct message.
        #[arg(long)]
        channel: Option<String>,
    },
    /// Serve the HTTP API and drive the chat console in one process,
    /// sharing a single workflow.
    Run {
        /// Account id the console messages come from.
        #[arg(long, default_value = "console")]
        account: String,
        /// Post in this guild channel instead of a direct message.
        #[arg(long)]
        channel: Option<String>,
    },
}

fn console_channel(channel: Option<String>) -> Channel {
    match channel {
        Some(channel_id) => Channel::Guild { channel_id },
        None => Channel::Direct,
    }
}

fn chat_frontend(config: &BotConfig, workflow: Arc<EnrollmentWorkflow>) -> ChatFrontend {
    let replies = Replies::new(
        config.bot_name.clone(),
        config.subscribe_template.clone(),
        config.task_template.clone(),
    );
    ChatFrontend::new(workflow, replies, config.allowed_channel.clone())
}

impl Cli {
    /// File (or default) config with CLI/env values on top.
    fn resolve_config(&self) -> anyhow::Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::from_toml_file(path)?,
            None => BotConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(port) = self.rpc_port {
            config.rpc_port = port;
        }
        if !self.cors_origins.is_empty() {
            config.cors_origins = self.cors_origins.clone();
        }
        if let Some(start) = &self.campaign_start {
            config.campaign_start = start.clone();
        }
        if let Some(url) = &self.x_api_base_url {
            config.x_api_base_url = url.clone();
        }
        if let Some(token) = &self.x_bearer_token {
            config.x_bearer_token = token.clone();
        }
        if let Some(channel) = &self.allowed_channel {
            config.allowed_channel = Some(channel.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

fn build_workflow(config: &BotConfig) -> anyhow::Result<Arc<EnrollmentWorkflow>> {
    let params = config.campaign_params()?;
    if config.x_bearer_token.is_empty() {
        tracing::warn!("no social platform bearer token configured; every probe will fail");
    }
    let lookup = XApiClient::with_timeout(
        config.x_api_base_url.clone(),
        config.x_bearer_token.clone(),
        Duration::from_secs(config.x_timeout_secs),
    );
    let store_path = config.store_path();
    let workflow = EnrollmentWorkflow::new(
        params,
        Collaborators {
            store: Arc::new(JsonFileStore::new(&store_path)),
            codes: Arc::new(OsCodeGenerator),
            addresses: Arc::new(Eip55Validator),
            lookup: Arc::new(lookup),
            clock: Arc::new(SystemClock),
        },
    )
    .with_context(|| format!("failed to load subscriptions from {}", store_path.display()))?;
    Ok(Arc::new(workflow))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    campaign_utils::init_tracing(&config.log_level, config.log_format);

    let workflow = build_workflow(&config)?;
    tracing::info!(
        store = %config.store_path().display(),
        subscriptions = workflow.subscription_count().await,
        campaign_start = %config.campaign_start,
        "campaign workflow ready"
    );

    match cli.command {
        Command::Serve => {
            let controller = Arc::new(shutdown::ShutdownController::new());
            let shutdown = controller.signalled();
            let signals = controller.clone();
            tokio::spawn(async move { signals.wait_for_signal().await });

            let server = RpcServer::new(config.rpc_port, config.cors_origins.clone());
            server.start(workflow, shutdown).await?;
            tracing::info!("campaign daemon exited cleanly");
        }
        Command::Console { account, channel } => {
            let frontend = chat_frontend(&config, workflow);
            let platform = console::ConsolePlatform::new(tokio::io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console::run_console(
                &frontend,
                &platform,
                stdin,
                AccountId::new(account),
                console_channel(channel),
            )
            .await?;
        }
        Command::Run { account, channel } => {
            let controller = Arc::new(shutdown::ShutdownController::new());
            let signals = controller.clone();
            tokio::spawn(async move { signals.wait_for_signal().await });

            let frontend = chat_frontend(&config, workflow);
            let platform = console::ConsolePlatform::new(tokio::io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            surfaces::run_surfaces(
                RpcServer::new(config.rpc_port, config.cors_origins.clone()),
                &frontend,
                &platform,
                stdin,
                AccountId::new(account),
                console_channel(channel),
                &controller,
            )
            .await?;
            tracing::info!("campaign daemon exited cleanly");
        }
    }

    Ok(())
}
