use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use paysync_client::{ApiClient, AuthClient, AuthOutcome};
use paysync_config::Settings;
use paysync_core::{dates, Locale};
use paysync_engine::{list_accounts, refresh};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::output;

/// How far back a refresh reaches when no explicit bound is given.
const DEFAULT_LOOKBACK_DAYS: i64 = 90;

#[derive(Parser)]
#[command(name = "paysync", about = "Synchronize a payment platform ledger", version)]
pub struct Cli {
    /// Path to a settings file (defaults to ./paysync.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Exchange credentials (and a one-time code, if challenged) for an
    /// access token.
    Login {
        #[arg(long)]
        email: String,
        /// One-time code from the second authentication step.
        #[arg(long)]
        otp: Option<String>,
    },
    /// List the creditor accounts visible to the configured token.
    Accounts,
    /// Run one ledger refresh and print balances plus transactions.
    Refresh {
        /// Lower bound, ISO 8601 datetime or date.
        #[arg(long)]
        since: Option<String>,
        /// Creditor id; defaults to the configured or sole visible account.
        #[arg(long)]
        creditor: Option<String>,
        /// Emit JSON instead of the human-readable summary.
        #[arg(long)]
        json: bool,
    },
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Login { email, otp } => login(&settings, &email, otp.as_deref()).await,
        Command::Accounts => accounts(&settings).await,
        Command::Refresh {
            since,
            creditor,
            json,
        } => run_refresh(&settings, since.as_deref(), creditor, json).await,
    }
}

async fn login(settings: &Settings, email: &str, otp: Option<&str>) -> Result<()> {
    let password = std::env::var("PAYSYNC_PASSWORD").or_else(|_| prompt_password())?;
    let auth = AuthClient::new(&settings.api.base_url);
    match auth.login(email, &password, otp).await? {
        AuthOutcome::Authenticated { access_token } => {
            println!("{access_token}");
            info!("store the token under [api] access_token or PAYSYNC_API__ACCESS_TOKEN");
        }
        AuthOutcome::ChallengeSent { channel } => {
            println!("one-time code sent via {channel}; repeat with --otp <code>");
        }
    }
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn accounts(settings: &Settings) -> Result<()> {
    let client = api_client(settings)?;
    let accounts = list_accounts(&client).await?;
    for account in &accounts {
        let currency = account.currency.as_deref().unwrap_or("-");
        println!("{}  {}  {}", account.id, currency, account.name);
    }
    Ok(())
}

async fn run_refresh(
    settings: &Settings,
    since: Option<&str>,
    creditor: Option<String>,
    json: bool,
) -> Result<()> {
    let client = api_client(settings)?;
    let locale: Locale = settings
        .locale
        .parse()
        .map_err(|err: String| anyhow!(err))?;
    let since = match since {
        Some(raw) => dates::parse_timestamp(raw)?,
        None => Utc::now() - Duration::days(DEFAULT_LOOKBACK_DAYS),
    };
    let creditor = match creditor.or_else(|| settings.account.creditor.clone()) {
        Some(creditor) => creditor,
        None => sole_account(&client).await?,
    };

    let outcome = refresh(&client, &creditor, since, locale).await?;
    if json {
        output::print_json(&outcome)?;
    } else {
        output::print_summary(&outcome);
    }
    Ok(())
}

/// Without an explicit creditor the token must resolve to exactly one
/// account; anything else needs the flag.
async fn sole_account(client: &ApiClient) -> Result<String> {
    let mut accounts = list_accounts(client).await?;
    match accounts.len() {
        1 => Ok(accounts.remove(0).id),
        0 => bail!("no creditor accounts visible to this token"),
        _ => bail!("multiple creditor accounts found; pass --creditor"),
    }
}

fn api_client(settings: &Settings) -> Result<ApiClient> {
    let token = settings
        .api
        .access_token
        .as_deref()
        .ok_or_else(|| anyhow!("no access token configured; run `paysync login` first"))?;
    Ok(ApiClient::new(&settings.api.base_url, token))
}
