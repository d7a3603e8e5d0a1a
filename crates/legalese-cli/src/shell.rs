//! Interactive session: stdin lines become typed commands for a single
//! dispatcher task.
//!
//! Lines starting with `/` are commands; anything else is a chat message.

use std::path::{Path, PathBuf};

use anyhow::Context;
use legalese_app::{Command, Controller, run_dispatcher};
use legalese_client::ApiClient;
use legalese_core::DroppedFile;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::display::TerminalView;

const COMMAND_BUFFER: usize = 32;

pub const HELP: &str = "\
Commands:
  /docs                     list loaded documents
  /upload <path> [as NAME]  upload a PDF, DOCX, or TXT file
  /drop <path>...           upload the first of the given files
  /sample                   load the bundled sample document
  /select <name>            make a document current
  /analyze                  simplify the current document
  /concerns                 flag concerning clauses in the current document
  /compare <a> | <b>        compare two documents
  /export [name]            save the latest result as a PDF
  /download [file]          fetch an exported PDF into the download directory
  /clear                    reset the conversation
  /help                     show this help
  /quit                     leave
Anything else is sent as a chat message about the current document.";

/// What a single input line asks for.
#[derive(Debug, PartialEq)]
pub enum ShellInput {
    Command(Command),
    /// Files to read before building a drop command.
    Drop(Vec<PathBuf>),
    Help,
    Quit,
    Empty,
}

/// Parse one line. `download_dir` is where `/download` writes.
pub fn parse_line(line: &str, download_dir: &Path) -> Result<ShellInput, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellInput::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ShellInput::Command(Command::Chat(line.to_string())));
    };

    let (verb, args) = match rest.split_once(char::is_whitespace) {
        Some((verb, args)) => (verb, args.trim()),
        None => (rest, ""),
    };

    let input = match verb {
        "docs" | "refresh" => Command::Refresh,
        "upload" => {
            if args.is_empty() {
                return Err("usage: /upload <path> [as NAME]".into());
            }
            let (path, name) = match args.split_once(" as ") {
                Some((path, name)) => (path.trim(), Some(name.trim().to_string())),
                None => (args, None),
            };
            Command::Upload {
                path: PathBuf::from(path),
                name,
            }
        }
        "drop" => {
            return Ok(ShellInput::Drop(
                args.split_whitespace().map(PathBuf::from).collect(),
            ));
        }
        "sample" => Command::LoadSample,
        "select" => {
            if args.is_empty() {
                return Err("usage: /select <name>".into());
            }
            Command::Select(args.to_string())
        }
        "analyze" | "analyse" => Command::Analyze,
        "concerns" => Command::Concerns,
        "compare" => {
            let (first, second) = split_pair(args)
                .ok_or_else(|| "usage: /compare <a> | <b>".to_string())?;
            Command::Compare { first, second }
        }
        "export" => Command::Export {
            filename: (!args.is_empty()).then(|| args.to_string()),
        },
        "download" => Command::Download {
            filename: (!args.is_empty()).then(|| args.to_string()),
            dir: download_dir.to_path_buf(),
        },
        "clear" => Command::ClearChat,
        "help" | "?" => return Ok(ShellInput::Help),
        "quit" | "exit" => return Ok(ShellInput::Quit),
        other => return Err(format!("unknown command: /{other} (try /help)")),
    };
    Ok(ShellInput::Command(input))
}

/// `a | b`, or two bare words.
fn split_pair(args: &str) -> Option<(String, String)> {
    let (first, second) = match args.split_once('|') {
        Some((a, b)) => (a.trim(), b.trim()),
        None => {
            let mut words = args.split_whitespace();
            let pair = (words.next()?, words.next()?);
            if words.next().is_some() {
                return None;
            }
            pair
        }
    };
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first.to_string(), second.to_string()))
}

/// Read the files of a drop gesture. Unreadable paths are skipped.
async fn read_dropped(paths: Vec<PathBuf>) -> Vec<DroppedFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match tokio::fs::read(&path).await {
            Ok(bytes) => files.push(DroppedFile {
                name: path.to_string_lossy().into_owned(),
                bytes,
            }),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable file"),
        }
    }
    files
}

/// Run the interactive loop until `/quit` or end of input.
pub async fn run(client: ApiClient, download_dir: PathBuf) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let dispatcher = tokio::spawn(async move {
        let mut controller = Controller::new(client, TerminalView::new());
        run_dispatcher(&mut controller, rx).await
    });

    println!("legalese v{} (type /help for commands)", env!("CARGO_PKG_VERSION"));
    tx.send(Command::Refresh)
        .await
        .context("dispatcher stopped")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match parse_line(&line, &download_dir) {
            Ok(ShellInput::Command(command)) => command,
            Ok(ShellInput::Drop(paths)) => Command::Drop {
                files: read_dropped(paths).await,
                name: None,
            },
            Ok(ShellInput::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(ShellInput::Quit) => break,
            Ok(ShellInput::Empty) => continue,
            Err(msg) => {
                println!("✖ {msg}");
                continue;
            }
        };
        debug!(command = command.name(), "queued");
        if tx.send(command).await.is_err() {
            break;
        }
    }

    drop(tx);
    let handled = dispatcher.await.context("dispatcher panicked")?;
    debug!(handled, "shell finished");
    Ok(())
}
