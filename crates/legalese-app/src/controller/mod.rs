//! Controllers: one impl block per concern, all on a single [`Controller`]
//! that owns the session state.
//!
//! Every handler follows the same shape: validate local state, raise the
//! busy flag, make one backend call, lower the flag, then hand the result to
//! the view or report the error. Nothing is retried.

mod analysis;
mod chat;
mod registry;
mod upload;

use legalese_client::Backend;
use legalese_core::Session;
use tracing::debug;

use crate::command::Command;
use crate::view::View;

pub struct Controller<B, V> {
    backend: B,
    view: V,
    session: Session,
    last_export: Option<String>,
}

impl<B: Backend, V: View> Controller<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view,
            session: Session::new(),
            last_export: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Server-side name of the most recent successful export.
    pub fn last_export(&self) -> Option<&str> {
        self.last_export.as_deref()
    }

    /// Run one command to completion.
    pub async fn handle(&mut self, command: Command) {
        debug!(command = command.name(), "handling command");
        match command {
            Command::Refresh => self.refresh().await,
            Command::Upload { path, name } => self.upload_path(&path, name.as_deref()).await,
            Command::Drop { files, name } => self.upload_drop(files, name.as_deref()).await,
            Command::LoadSample => self.load_sample().await,
            Command::Select(name) => {
                self.select(&name);
            }
            Command::Analyze => self.analyze().await,
            Command::Concerns => self.concerns().await,
            Command::Compare { first, second } => self.compare(&first, &second).await,
            Command::Export { filename } => {
                self.export(filename.as_deref()).await;
            }
            Command::Download { filename, dir } => {
                self.download(filename.as_deref(), &dir).await;
            }
            Command::Chat(message) => self.send_chat(&message).await,
            Command::ClearChat => self.clear_chat().await,
        }
    }
}
