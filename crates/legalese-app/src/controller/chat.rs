use legalese_client::Backend;
use legalese_core::ChatMessage;
use tracing::{info, warn};

use super::Controller;
use crate::render::chat_entry_view;
use crate::toast::Toast;
use crate::view::View;

impl<B: Backend, V: View> Controller<B, V> {
    fn append_message(&mut self, message: ChatMessage) {
        self.view.append_chat(chat_entry_view(&message));
        self.session.push_message(message);
    }

    /// Send one chat turn scoped to the current document, if any.
    ///
    /// The user's message is shown before the request goes out. Failures are
    /// appended to the transcript rather than toasted.
    pub async fn send_chat(&mut self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }

        self.append_message(ChatMessage::user(message));
        self.view.clear_chat_input();

        let doc = self.session.current().map(str::to_string);
        self.view.set_busy(true);
        let result = self.backend.chat(message, doc.as_deref()).await;
        self.view.set_busy(false);

        match result {
            Ok(reply) => {
                info!(doc_name = ?doc, chars = reply.len(), "chat reply received");
                self.append_message(ChatMessage::bot(reply));
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.append_message(ChatMessage::error(e.user_message()));
            }
        }
    }

    /// Reset the server conversation, then the local transcript.
    ///
    /// The local transcript is only cleared once the server confirms.
    pub async fn clear_chat(&mut self) {
        self.view.set_busy(true);
        let result = self.backend.clear_chat().await;
        self.view.set_busy(false);

        match result {
            Ok(()) => {
                self.session.clear_transcript();
                self.view.clear_chat();
                info!("conversation cleared");
                self.view.toast(Toast::success("Conversation cleared"));
            }
            Err(e) => {
                warn!(error = %e, "clear failed");
                self.view.toast(Toast::error(e.user_message()));
            }
        }
    }
}
