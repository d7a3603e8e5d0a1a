mod display;
mod shell;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use legalese_app::{Command, Controller};
use legalese_client::ApiClient;
use legalese_core::ClientConfig;
use legalese_core::config::DEFAULT_BASE_URL;
use tracing_subscriber::EnvFilter;

use crate::display::TerminalView;

#[derive(Parser)]
#[command(name = "legalese", version, about = "Plain-language legal document analysis")]
struct Cli {
    /// Server origin
    #[arg(long, env = "LEGALESE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    url: String,

    /// Abandon requests after this many seconds (default: wait indefinitely)
    #[arg(long, env = "LEGALESE_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded documents
    Docs,
    /// Upload a PDF, DOCX, or TXT document
    Upload {
        path: PathBuf,
        /// Display name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Load the bundled sample document
    Sample,
    /// Simplify a document into plain language
    Analyze {
        /// Document name (defaults to the first loaded document)
        doc: Option<String>,
    },
    /// Flag concerning clauses
    Concerns { doc: Option<String> },
    /// Compare two loaded documents
    Compare { first: String, second: String },
    /// Save the latest result as a PDF on the server
    Export {
        #[arg(long)]
        filename: Option<String>,
        /// Also download the PDF into this directory
        #[arg(long)]
        download: Option<PathBuf>,
    },
    /// Fetch an exported PDF
    Download {
        filename: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Ask a question, optionally about a specific document
    Chat {
        message: String,
        #[arg(long)]
        doc: Option<String>,
    },
    /// Reset the server-side conversation
    Clear,
    /// Interactive session (the default)
    Shell {
        /// Where /download writes files
        #[arg(long, default_value = ".")]
        download_dir: PathBuf,
    },
}

const LOG_TARGETS: &[&str] = &["legalese_cli", "legalese_app", "legalese_client", "legalese_core"];

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .chain(std::iter::once("warn".to_string()))
        .collect();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives.join(",")))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    tracing::debug!("legalese v{}", env!("CARGO_PKG_VERSION"));

    let config =
        ClientConfig::new(&cli.url).with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let client = ApiClient::new(&config).context("building HTTP client")?;

    let command = cli.command.unwrap_or(Commands::Shell {
        download_dir: PathBuf::from("."),
    });
    if let Commands::Shell { download_dir } = command {
        return shell::run(client, download_dir).await;
    }

    let mut controller = Controller::new(client, TerminalView::new());
    run_once(&mut controller, command).await;

    let errors = controller.into_view().errors();
    if errors > 0 {
        anyhow::bail!("{errors} request(s) failed");
    }
    Ok(())
}

/// Select `doc` when given. Returns `false` if it is not loaded.
fn select_if_named(controller: &mut Controller<ApiClient, TerminalView>, doc: Option<&str>) -> bool {
    doc.is_none_or(|name| controller.select(name))
}

async fn run_once(controller: &mut Controller<ApiClient, TerminalView>, command: Commands) {
    match command {
        Commands::Docs => controller.handle(Command::Refresh).await,
        Commands::Upload { path, name } => {
            controller.handle(Command::Upload { path, name }).await
        }
        Commands::Sample => controller.handle(Command::LoadSample).await,
        Commands::Analyze { doc } => {
            controller.refresh().await;
            if select_if_named(controller, doc.as_deref()) {
                controller.handle(Command::Analyze).await;
            }
        }
        Commands::Concerns { doc } => {
            controller.refresh().await;
            if select_if_named(controller, doc.as_deref()) {
                controller.handle(Command::Concerns).await;
            }
        }
        Commands::Compare { first, second } => {
            controller.handle(Command::Compare { first, second }).await
        }
        Commands::Export { filename, download } => {
            controller.handle(Command::Export { filename }).await;
            if let Some(dir) = download
                && controller.last_export().is_some()
            {
                controller
                    .handle(Command::Download {
                        filename: None,
                        dir,
                    })
                    .await;
            }
        }
        Commands::Download { filename, dir } => {
            controller
                .handle(Command::Download {
                    filename: Some(filename),
                    dir,
                })
                .await
        }
        Commands::Chat { message, doc } => {
            controller.refresh().await;
            if select_if_named(controller, doc.as_deref()) {
                controller.handle(Command::Chat(message)).await;
            }
        }
        Commands::Clear => controller.handle(Command::ClearChat).await,
        Commands::Shell { .. } => unreachable!("handled before the controller is built"),
    }
}
