//! Typed UI actions and the loop that consumes them.

use std::path::PathBuf;

use legalese_client::Backend;
use legalese_core::DroppedFile;
use tokio::sync::mpsc;
use tracing::info;

use crate::controller::Controller;
use crate::view::View;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    /// Upload a file from disk, optionally under a display name.
    Upload {
        path: PathBuf,
        name: Option<String>,
    },
    /// Files released by a drag-and-drop gesture.
    Drop {
        files: Vec<DroppedFile>,
        name: Option<String>,
    },
    LoadSample,
    Select(String),
    Analyze,
    Concerns,
    Compare {
        first: String,
        second: String,
    },
    Export {
        filename: Option<String>,
    },
    /// `filename` defaults to the last export.
    Download {
        filename: Option<String>,
        dir: PathBuf,
    },
    Chat(String),
    ClearChat,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Upload { .. } => "upload",
            Self::Drop { .. } => "drop",
            Self::LoadSample => "sample",
            Self::Select(_) => "select",
            Self::Analyze => "analyze",
            Self::Concerns => "concerns",
            Self::Compare { .. } => "compare",
            Self::Export { .. } => "export",
            Self::Download { .. } => "download",
            Self::Chat(_) => "chat",
            Self::ClearChat => "clear",
        }
    }
}

/// Handle commands one at a time, in arrival order, until every sender is
/// dropped. Returns the number of commands handled.
///
/// Commands queued while one is in flight wait their turn, so the last
/// command issued is the one whose result stays on screen.
pub async fn run_dispatcher<B: Backend, V: View>(
    controller: &mut Controller<B, V>,
    mut commands: mpsc::Receiver<Command>,
) -> usize {
    let mut handled = 0usize;
    while let Some(command) = commands.recv().await {
        controller.handle(command).await;
        handled += 1;
    }
    info!(handled, "command channel closed");
    handled
}
