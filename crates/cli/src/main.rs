//! RulesKit CLI - Command-line interface for the rule service

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ruleskit_sdk::{ClientConfig, RulesError, RulesKitClient};
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "ruleskit")]
#[command(about = "RulesKit rule service CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rule service base URL
    #[arg(long, env = "RULESKIT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in milliseconds (no timeout when unset)
    #[arg(long, env = "RULESKIT_TIMEOUT_MS")]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List known operations
    Operations,

    /// Call a catalog operation by name
    Call {
        /// Operation name (e.g., resolveBeamCollisions)
        name: String,

        /// Input as a JSON string, or @path to read it from a file
        #[arg(short, long)]
        input: String,
    },

    /// Call a registry rule that has no catalog entry
    Apply {
        /// Owning agent (e.g., BeamingAgent)
        agent: String,

        /// Rule id (e.g., RULE.Beaming.auto_knee_threshold)
        rule_id: String,

        /// Input as a JSON string, or @path to read it from a file
        #[arg(short, long)]
        input: String,
    },
}

#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Input")]
    input: &'static str,
    #[tabled(rename = "Output")]
    output: &'static str,
}

fn init_logging() {
    let log_format = std::env::var("RULESKIT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ruleskit=warn"));

    // stdout is reserved for command output
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn read_input(input: &str) -> Result<serde_json::Value> {
    let text = match input.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path))?,
        None => input.to_string(),
    };
    serde_json::from_str(&text).context("Invalid JSON input")
}

fn build_client(cli: &Cli) -> Result<RulesKitClient> {
    let mut config = ClientConfig::new(cli.base_url.as_str());
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    debug!(
        base_url = %cli.base_url,
        timeout_ms = ?cli.timeout_ms,
        "Connecting to rule service"
    );
    Ok(RulesKitClient::with_config(config)?)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<RulesError>() {
        Some(RulesError::Transport { kind, message }) => {
            format!("{} ({}): {}", "Transport error".bold(), kind, message)
        }
        Some(RulesError::ServerRejection { status, body }) => {
            format!("{} {}: {}", "Server rejected request with".bold(), status, body)
        }
        Some(RulesError::Decode { path, source }) => {
            format!("{} from {}: {}", "Unexpected response".bold(), path, source)
        }
        Some(other) => other.to_string(),
        None => format!("{:#}", err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Operations => {
            let rows: Vec<OperationRow> = RulesKitClient::operations()
                .iter()
                .map(|d| OperationRow {
                    name: d.name,
                    path: d.path,
                    input: d.input_shape,
                    output: d.output_shape,
                })
                .collect();

            println!("{}", "Known operations".cyan().bold());
            println!();
            println!("{}", Table::new(rows));
        }

        Commands::Call { name, input } => {
            let input = read_input(input)?;
            let client = build_client(&cli)?;

            let output = client.invoke_json(name, input).await?;
            print_json(&output)?;
        }

        Commands::Apply {
            agent,
            rule_id,
            input,
        } => {
            let input = read_input(input)?;
            let client = build_client(&cli)?;

            let output = client.apply_rule(agent, rule_id, &input).await?;
            print_json(&output)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "✗".red(), describe(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_read_input_inline_json() {
        let value = read_input(r#"{"offsets": [0.5]}"#).unwrap();
        assert_eq!(value["offsets"][0], 0.5);
    }

    #[test]
    fn test_read_input_rejects_invalid_json() {
        assert!(read_input("{not json").is_err());
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input("@/nonexistent/ruleskit-input.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_build_client_from_flags() {
        let cli = Cli::try_parse_from([
            "ruleskit",
            "--base-url",
            "http://127.0.0.1:9000/rules",
            "--timeout-ms",
            "250",
            "operations",
        ])
        .unwrap();
        assert_eq!(cli.timeout_ms, Some(250));
        assert!(build_client(&cli).is_ok());

        let cli = Cli::try_parse_from(["ruleskit", "--base-url", "ftp://nowhere", "operations"])
            .unwrap();
        assert!(build_client(&cli).is_err());
    }

    #[test]
    fn test_describe_server_rejection() {
        colored::control::set_override(false);
        let err = anyhow::Error::new(RulesError::ServerRejection {
            status: 500,
            body: "internal error".to_string(),
        });
        let text = describe(&err);
        assert!(text.contains("500"));
        assert!(text.contains("internal error"));
    }
}
