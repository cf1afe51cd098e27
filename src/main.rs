use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use netdto_lint::adapters::json::load_config;
use netdto_lint::app::engine::{AnalysisEngine, rules_response};
use netdto_lint::cli::{self, OutputFormat};
use netdto_lint::domain::config::AnalysisConfig;
use netdto_lint::server;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dtolint",
    version,
    about = "Checks network-layer DTOs reachable from API endpoints for mutability and serialization tags"
)]
struct Cli {
    /// Declaration store (JSON export)
    store: Option<PathBuf>,

    /// Analysis config (JSON); defaults apply to missing keys
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all detectors
    Check {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Only report these rule ids
        #[arg(long = "rule")]
        rules: Vec<String>,
    },
    /// List endpoints and their payload types
    Endpoints,
    /// List the fields reachable from one endpoint
    Fields { interface: String, method: String },
    /// Dump the declared type graph as JSON
    Graph,
    /// Print the issue registry
    Rules,
    /// Print the JSON Schema of the declaration format
    Schema,
    /// Serve the analysis over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Schema => {
            cli::print_schema()?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Rules => {
            let config = match &args.config {
                Some(path) => load_config(path)?,
                None => AnalysisConfig::default(),
            };
            cli::print_rules(&rules_response(&config));
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let store = args
        .store
        .context("A declaration store file is required for this command")?;
    let engine = AnalysisEngine::load(&store, args.config.as_deref())?;

    match args.command {
        Commands::Check { format, rules } => {
            let res = cli::check(&engine, &rules, format)?;
            if res.error_count > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Endpoints => cli::list_endpoints(&engine)?,
        Commands::Fields { interface, method } => cli::list_fields(&engine, &interface, &method)?,
        Commands::Graph => cli::print_graph(&engine)?,
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid listen address: {host}:{port}"))?;
            let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
            eprintln!("Listening on http://{addr}");
            rt.block_on(server::http::serve(engine, addr))?;
        }
        Commands::Schema | Commands::Rules => {}
    }

    Ok(ExitCode::SUCCESS)
}
