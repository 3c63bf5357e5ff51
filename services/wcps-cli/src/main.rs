//! WCPS command-line tool.
//!
//! Renders declarative coverage queries to WCPS and optionally runs them
//! against a rasdaman-style OWS endpoint:
//!
//! ```text
//! wcps render -c AvgLandTemp -s ansi=2014-07 -s Lat=-20:30 -s Long=10:30 --encode png
//! wcps execute -c AvgLandTemp -s ansi=2014-07 -s Lat=-20:30 -s Long=10:30 --encode png -o map.png
//! wcps describe AvgLandTemp
//! ```

mod query_args;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wcps_client::{decode, ClientConfig, Connector, Decoded};

use query_args::QueryArgs;

#[derive(Parser, Debug)]
#[command(name = "wcps")]
#[command(about = "Render WCPS queries and run them against a coverage server")]
struct Cli {
    /// OWS endpoint of the coverage server
    #[arg(long, global = true, env = "WCPS_SERVER_URL")]
    server_url: Option<String>,

    /// Client configuration file (YAML)
    #[arg(long, global = true, env = "WCPS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the WCPS text of a query
    Render {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Submit a query and print or save the result
    Execute {
        #[command(flatten)]
        query: QueryArgs,

        /// Write the raw response to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the server's WCS capabilities document
    Capabilities,

    /// Print the DescribeCoverage document of a coverage
    Describe {
        /// Coverage identifier
        coverage: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    match &cli.command {
        Commands::Render { query } => {
            let text = query.build_query()?.render().context("Failed to render query")?;
            println!("{}", text);
        }
        Commands::Execute { query, output } => {
            let text = query.build_query()?.render().context("Failed to render query")?;
            let connector = connector(&cli)?;

            info!(endpoint = %connector.endpoint(), "Executing query");
            let payload = connector.execute_raw(&text).await?;

            match output {
                Some(path) => {
                    std::fs::write(path, &payload.body)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), bytes = payload.body.len(), "Saved response");
                }
                None => match decode(&payload)? {
                    Decoded::Text(text) => println!("{}", text),
                    decoded => println!("{}", decoded.summary()),
                },
            }
        }
        Commands::Capabilities => {
            println!("{}", connector(&cli)?.server_capabilities().await?);
        }
        Commands::Describe { coverage } => {
            println!("{}", connector(&cli)?.coverage_metadata(coverage).await?);
        }
    }

    Ok(())
}

fn connector(cli: &Cli) -> Result<Connector> {
    let config = resolve_config(cli.config.as_deref(), cli.server_url.as_deref(), |key| {
        std::env::var(key).ok()
    })?;
    Ok(Connector::new(config)?)
}

/// Resolve client settings: config file first, then `--server-url`, then
/// the `WCPS_*` variables. `--server-url` overrides the file's endpoint.
fn resolve_config<F>(
    config_path: Option<&Path>,
    server_url: Option<&str>,
    env: F,
) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match (config_path, server_url) {
        (Some(path), _) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load client config: {}", path.display()))?,
        (None, Some(url)) => ClientConfig::new(url),
        (None, None) => ClientConfig::from_lookup(env)
            .context("No server configured; pass --server-url or set WCPS_SERVER_URL")?,
    };

    if let (Some(_), Some(url)) = (config_path, server_url) {
        config.server_url = url.to_string();
    }

    Ok(config)
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url: http://file.example/ows\nmax_retries: 5").unwrap();
        file
    }

    #[test]
    fn test_server_url_overrides_config_file() {
        let file = config_file();
        let config =
            resolve_config(Some(file.path()), Some("http://flag.example/ows"), no_env).unwrap();

        assert_eq!(config.server_url, "http://flag.example/ows");
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_config_file_beats_environment() {
        let file = config_file();
        let config = resolve_config(Some(file.path()), None, |_| {
            Some("http://env.example/ows".to_string())
        })
        .unwrap();

        assert_eq!(config.server_url, "http://file.example/ows");
    }

    #[test]
    fn test_server_url_without_config_file() {
        let config = resolve_config(None, Some("http://flag.example/ows"), |_| {
            Some("http://env.example/ows".to_string())
        })
        .unwrap();

        assert_eq!(config.server_url, "http://flag.example/ows");
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_environment_fallback() {
        let config = resolve_config(None, None, |key| match key {
            "WCPS_SERVER_URL" => Some("http://env.example/ows".to_string()),
            "WCPS_MAX_RETRIES" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server_url, "http://env.example/ows");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_nothing_configured() {
        let err = resolve_config(None, None, no_env).unwrap_err();
        assert!(err.to_string().contains("No server configured"));
    }
}
