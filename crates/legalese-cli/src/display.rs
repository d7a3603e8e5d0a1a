//! Terminal rendering of results, registry cards, and chat turns.

use std::io::{IsTerminal, Write};

use legalese_app::render::{ConcernCard, TextCard, concerns_header};
use legalese_app::render::{EMPTY_REGISTRY_MESSAGE, NO_CONCERNS_ICON, NO_CONCERNS_TEXT, NO_CONCERNS_TITLE};
use legalese_app::{ChatEntryView, DocumentListView, ResultView, Toast, ToastKind, View};
use legalese_core::document::truncate_text;

const MAX_NAME_WIDTH: usize = 40;

// ── Formatting ──

pub fn format_result(view: &ResultView) -> String {
    match view {
        ResultView::Text(card) => format_text_card(card),
        ResultView::NoConcerns => {
            format!("=== {NO_CONCERNS_ICON} {NO_CONCERNS_TITLE} ===\n{NO_CONCERNS_TEXT}\n")
        }
        ResultView::Concerns { count, cards } => {
            let mut out = format!("=== ⚠️ {} ===\n\n", concerns_header(*count));
            for (i, card) in cards.iter().enumerate() {
                out.push_str(&format_concern(i + 1, card));
            }
            out
        }
    }
}

fn format_text_card(card: &TextCard) -> String {
    let mut out = format!("=== {} {} ===\n", card.icon, card.title);
    for line in card.text.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn format_concern(n: usize, card: &ConcernCard) -> String {
    let sev = card.severity;
    let mut out = format!("{n}. {} {}\n", sev.emoji(), sev.label());
    out.push_str(&format!("  {:<16} \"{}\"\n", "clause", card.clause));
    out.push_str(&format!("  {:<16} {}\n", "concern", card.concern));
    out.push_str(&format!("  {:<16} {}\n\n", "recommendation", card.recommendation));
    out
}

pub fn format_documents(view: &DocumentListView) -> String {
    match view {
        DocumentListView::Empty => format!("{EMPTY_REGISTRY_MESSAGE}\n"),
        DocumentListView::Cards(cards) => {
            let mut out = format!("Documents ({})\n", cards.len());
            for card in cards {
                let marker = if card.active { "*" } else { " " };
                out.push_str(&format!(
                    "{marker} {:<width$}  {}  {} chars  {}\n",
                    truncate_text(&card.name, MAX_NAME_WIDTH),
                    card.loaded_at,
                    card.length,
                    card.reading_time,
                    width = MAX_NAME_WIDTH,
                ));
            }
            out
        }
    }
}

pub fn format_chat_entry(entry: &ChatEntryView) -> String {
    if entry.failed {
        format!("{} [error]: {}", entry.speaker(), entry.content)
    } else {
        format!("{}: {}", entry.speaker(), entry.content)
    }
}

pub fn format_toast(toast: &Toast) -> String {
    let symbol = match toast.kind {
        ToastKind::Success => "✔",
        ToastKind::Error => "✖",
        ToastKind::Info => "ℹ",
    };
    format!("{symbol} {}", toast.message)
}

// ── Terminal view ──

/// Prints everything a controller reports to stdout; the busy indicator
/// goes to stderr when it is a terminal.
#[derive(Debug, Default)]
pub struct TerminalView {
    errors: usize,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error toasts and failed chat turns seen so far.
    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl View for TerminalView {
    fn set_busy(&mut self, busy: bool) {
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        if busy {
            let _ = write!(stderr, "  working...");
        } else {
            let _ = write!(stderr, "\r{:14}\r", "");
        }
        let _ = stderr.flush();
    }

    fn toast(&mut self, toast: Toast) {
        if toast.kind == ToastKind::Error {
            self.errors += 1;
        }
        println!("{}", format_toast(&toast));
    }

    fn show_documents(&mut self, documents: DocumentListView) {
        print!("{}", format_documents(&documents));
    }

    fn show_result(&mut self, result: ResultView) {
        println!();
        print!("{}", format_result(&result));
    }

    fn append_chat(&mut self, entry: ChatEntryView) {
        if entry.failed {
            self.errors += 1;
        }
        println!("{}", format_chat_entry(&entry));
    }

    fn clear_chat(&mut self) {}

    fn export_ready(&mut self, filename: &str) {
        println!("  fetch it with: legalese download {filename}");
    }
}
