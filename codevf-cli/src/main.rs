//! CodeVF CLI - Invoke a human-in-the-loop review task and wait for completion
//!
//! Exit codes: 0 on success (JSON result on stdout), 1 on timeout or other
//! runtime failure (message on stderr), 2 on argument validation failure.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use codevf_client::{ClientConfig, CodeVfClient};
use codevf_core::{HumanInTheLoop, Invocation, ReviewOptions, ServiceMode, TasksApi};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::FileConfig;

/// Invoke a CodeVF human-in-the-loop task and wait for completion
#[derive(Parser, Debug)]
#[command(name = "codevf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Prompt to send to CodeVF
    #[arg(required = true)]
    prompt: String,

    /// CodeVF project ID. Defaults to CODEVF_PROJECT_ID
    #[arg(long, env = "CODEVF_PROJECT_ID")]
    project_id: Option<u64>,

    /// Max credits for the task. Defaults to CODEVF_MAX_CREDITS
    #[arg(
        long = "max-credit",
        visible_alias = "max-credits",
        env = "CODEVF_MAX_CREDITS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_credit: Option<u32>,

    /// Invoke timeout in seconds. Defaults to (2 * max_credit) + 300.
    /// Use -1 for infinite wait
    #[arg(short = 't', long, value_parser = parse_timeout, allow_hyphen_values = true)]
    timeout: Option<f64>,

    /// Optional expertise tag ID from GET /tags
    #[arg(long)]
    tag_id: Option<u64>,

    /// Polling interval in seconds while waiting for completion
    #[arg(long, value_parser = parse_poll_interval)]
    poll_interval: Option<f64>,

    /// CodeVF service mode (for example: standard, fast)
    #[arg(long)]
    mode: Option<String>,

    /// CodeVF API key. Defaults to CODEVF_API_KEY
    #[arg(long, env = "CODEVF_API_KEY")]
    api_key: Option<String>,

    /// CodeVF API base URL. Defaults to CODEVF_BASE_URL
    #[arg(long, env = "CODEVF_BASE_URL")]
    base_url: Option<String>,

    /// Path to the config file (defaults to ~/.config/codevf/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Settings after flag > env > file > default resolution
#[derive(Debug)]
struct Settings {
    project_id: u64,
    max_credits: u32,
    mode: ServiceMode,
    poll_interval: Duration,
    timeout: Option<f64>,
    tag_id: Option<u64>,
    api_key: Option<String>,
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let file = match load_file_config(&cli) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::from(1);
        }
    };

    // Missing required configuration is an argument error, same as a bad flag
    let settings = match resolve_settings(&cli, &file) {
        Ok(settings) => settings,
        Err(message) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, message)
            .exit(),
    };

    ExitCode::from(finish(run(&cli.prompt, settings).await))
}

async fn run(prompt: &str, settings: Settings) -> anyhow::Result<Invocation> {
    let client = CodeVfClient::new(ClientConfig {
        api_key: settings.api_key.clone(),
        base_url: settings.base_url.clone(),
    })?;
    invoke_with_api(prompt, Arc::new(client), settings).await
}

async fn invoke_with_api(
    prompt: &str,
    api: Arc<dyn TasksApi>,
    settings: Settings,
) -> anyhow::Result<Invocation> {
    let mut options = ReviewOptions::new(settings.project_id)
        .with_max_credits(settings.max_credits)
        .with_mode(settings.mode)
        .with_poll_interval(settings.poll_interval);
    if let Some(timeout) = settings.timeout {
        options = options.with_timeout_secs(timeout);
    }
    if let Some(tag_id) = settings.tag_id {
        options = options.with_tag_id(tag_id);
    }

    let hitl = HumanInTheLoop::new(api, options)?;
    Ok(hitl.invoke(prompt, None, None).await?)
}

/// Print the outcome and map it to the process exit code
///
/// Success prints the JSON result on stdout and returns 0; any failure,
/// timeouts included, prints the error on stderr and returns 1.
fn finish(result: anyhow::Result<Invocation>) -> u8 {
    match result {
        Ok(invocation) => match serde_json::to_string_pretty(&invocation) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(err) => {
                eprintln!("{}", err);
                1
            }
        },
        Err(err) => {
            eprintln!("{:#}", err);
            1
        }
    }
}

fn load_file_config(cli: &Cli) -> anyhow::Result<FileConfig> {
    match &cli.config {
        Some(path) => FileConfig::load_from_file(path),
        None => FileConfig::load(),
    }
}

fn resolve_settings(cli: &Cli, file: &FileConfig) -> Result<Settings, String> {
    let project_id = cli
        .project_id
        .or(file.project_id)
        .ok_or("Missing project_id configuration. Set --project-id or CODEVF_PROJECT_ID.")?;

    let max_credits = cli
        .max_credit
        .or(file.max_credits)
        .ok_or("Missing max_credit configuration. Set --max-credit or CODEVF_MAX_CREDITS.")?;
    if max_credits == 0 {
        return Err("--max-credit must be greater than 0.".to_string());
    }

    let mode = cli
        .mode
        .clone()
        .or_else(|| file.mode.clone())
        .map(|mode| mode.parse::<ServiceMode>().unwrap_or_default())
        .unwrap_or_default();

    let poll_interval = match cli.poll_interval {
        Some(secs) => Duration::from_secs_f64(secs),
        None => file
            .poll_interval
            .unwrap_or(codevf_core::tool::DEFAULT_POLL_INTERVAL),
    };
    if poll_interval.is_zero() {
        return Err("--poll-interval must be greater than 0.".to_string());
    }

    Ok(Settings {
        project_id,
        max_credits,
        mode,
        poll_interval,
        timeout: cli.timeout,
        tag_id: cli.tag_id,
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone().or_else(|| file.base_url.clone()),
    })
}

fn parse_timeout(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| "timeout must be a number of seconds or -1 for infinite wait.".to_string())?;

    if value == -1.0 {
        return Ok(value);
    }
    if !value.is_finite() || value <= 0.0 {
        return Err("timeout must be greater than 0, or -1 for infinite wait.".to_string());
    }
    if Duration::try_from_secs_f64(value).is_err() {
        return Err("timeout value is out of range.".to_string());
    }
    Ok(value)
}

fn parse_poll_interval(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| "poll-interval must be a number of seconds.".to_string())?;

    if !value.is_finite() || value <= 0.0 {
        return Err("--poll-interval must be greater than 0.".to_string());
    }
    if Duration::try_from_secs_f64(value).is_err() {
        return Err("--poll-interval value is out of range.".to_string());
    }
    Ok(value)
}
