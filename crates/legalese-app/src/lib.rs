//! Client orchestration: typed commands, controllers, and view-models.
//!
//! A [`Command`] is consumed by a single [`Controller`], which calls the
//! [`Backend`](legalese_client::Backend), updates the [`Session`](legalese_core::Session),
//! and reports to a [`View`]. Rendering goes through view-model types in
//! [`render`] and the pure functions in [`html`].

pub mod command;
pub mod controller;
pub mod html;
pub mod render;
pub mod toast;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{Command, run_dispatcher};
pub use controller::Controller;
pub use render::{ChatEntryView, DocumentCardView, DocumentListView, ResultView};
pub use toast::{Toast, ToastKind, ToastTray};
pub use view::{Screen, View};
