//! apitoc: table of contents and search for API documentation.
//!
//! Usage:
//!   apitoc --mcp --service <file>     # Start MCP server for one API description
//!   apitoc tree <file>                # Print the navigation tree
//!   apitoc groups <file>              # Print tag groups
//!   apitoc search <file> <query>      # Search operations and schemas
//!   apitoc repl <file>                # Interactive debounced search on stdin

use anyhow::Context;
use apitoc::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_SEARCH_LIMIT};
use apitoc::server::ApitocServer;
use apitoc::ServerError;
use apitoc::services::{load_service, SearchSession, TreeConfig};
use apitoc::tools::{SearchInput, SearchOutput, TocInput};
use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apitoc")]
#[command(about = "Table of contents and search for API documentation")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC)
    #[arg(long)]
    mcp: bool,

    /// Service description served in MCP mode (OpenAPI/Swagger JSON or service JSON)
    #[arg(long)]
    service: Option<PathBuf>,

    /// Drop operations and schemas flagged internal
    #[arg(long, global = true)]
    hide_internal: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation tree
    Tree {
        /// Service description file
        file: PathBuf,

        /// Leave out the Schemas section
        #[arg(long)]
        hide_schemas: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print tag groups in display order
    Groups {
        /// Service description file
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search operations and schemas
    Search {
        /// Service description file
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum results
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Read queries from stdin, one per line, with debounced search
    Repl {
        /// Service description file
        file: PathBuf,

        /// Debounce delay in milliseconds
        #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
        debounce_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr only (stdout is JSON-RPC for MCP)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("apitoc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color && std::io::stdout().is_terminal();

    if cli.mcp {
        let Some(path) = cli.service else {
            return Err(ServerError::Config("--mcp requires --service <file>".into()).into());
        };
        let config = TreeConfig {
            hide_schemas: false,
            hide_internal: cli.hide_internal,
        };
        run_mcp_server(&path, config).await
    } else if let Some(cmd) = cli.command {
        run_cli(cmd, cli.hide_internal, color).await
    } else {
        eprintln!("Use --mcp --service <file> to start the MCP server, or a subcommand for CLI mode.");
        eprintln!("Run with --help for more information.");
        std::process::exit(1);
    }
}

async fn run_mcp_server(path: &Path, config: TreeConfig) -> anyhow::Result<()> {
    tracing::info!("Starting MCP server for {}", path.display());

    let server = ApitocServer::load(path, config)?;

    // Run the MCP server on stdin/stdout
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

async fn run_cli(cmd: Commands, hide_internal: bool, color: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    match cmd {
        Commands::Tree {
            file,
            hide_schemas,
            json,
        } => {
            let service = load(&file)?;
            let input = TocInput {
                hide_schemas,
                hide_internal,
            };
            let result = apitoc::tools::execute_toc(&service, &input);
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                apitoc::fmt::fmt_tree(&mut stdout, &result, color)?;
            }
        }

        Commands::Groups { file, json } => {
            let service = load(&file)?;
            let result = apitoc::tools::execute_groups(&service);
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                apitoc::fmt::fmt_groups(&mut stdout, &result, color)?;
            }
        }

        Commands::Search {
            file,
            query,
            limit,
            json,
        } => {
            let service = load(&file)?;
            let tree = apitoc::compute_api_tree(
                &service,
                TreeConfig {
                    hide_schemas: false,
                    hide_internal,
                },
            );
            let input = SearchInput { query, limit };
            let result =
                apitoc::tools::execute_search(&tree, input).map_err(|e| anyhow::anyhow!(e))?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                apitoc::fmt::fmt_search(&mut stdout, &result, color)?;
            }
        }

        Commands::Repl { file, debounce_ms } => {
            drop(stdout);
            let service = load(&file)?;
            let config = TreeConfig {
                hide_schemas: false,
                hide_internal,
            };
            run_repl(&service, config, Duration::from_millis(debounce_ms), color).await?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<apitoc::ServiceNode> {
    load_service(path).with_context(|| format!("Failed to load {}", path.display()))
}

async fn run_repl(
    service: &apitoc::ServiceNode,
    config: TreeConfig,
    delay: Duration,
    color: bool,
) -> anyhow::Result<()> {
    let tree = Arc::new(apitoc::compute_api_tree(service, config));
    let session = SearchSession::new(tree).with_delay(delay);
    let mut rx = session.subscribe();

    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.query.is_empty() {
                continue;
            }
            let out = SearchOutput::from(state);
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = apitoc::fmt::fmt_search(&mut stdout, &out, color) {
                tracing::warn!("Failed to print results: {}", e);
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query.is_empty() {
            session.clear();
        } else {
            session.submit(query);
        }
    }

    // Let the last query settle before shutting down
    tokio::time::sleep(session.delay() + Duration::from_millis(50)).await;
    drop(session);
    join_printer(printer).await;

    Ok(())
}

/// Waits for the result printer, logging a panic or cancellation.
///
/// Returns whether the printer finished cleanly.
async fn join_printer(printer: tokio::task::JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Result printer stopped abnormally: {}", e);
            false
        }
    }
}
