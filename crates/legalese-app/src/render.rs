//! View-models for server results.
//!
//! Pure mappings from response payloads to what should be shown. Nothing here
//! holds state; [`crate::html`] and the terminal display turn these into text.

use legalese_core::{ChatMessage, Concern, DocumentDescriptor, Role, Session, Severity};

pub const ANALYSIS_ICON: &str = "📋";
pub const COMPARISON_ICON: &str = "⚖️";
pub const CONCERNS_ICON: &str = "⚠️";
pub const NO_CONCERNS_ICON: &str = "✅";

pub const EMPTY_REGISTRY_MESSAGE: &str = "No documents loaded yet";
pub const NO_CONCERNS_TITLE: &str = "No Major Concerns Found";
pub const NO_CONCERNS_TEXT: &str =
    "This document appears to have standard terms. Always consult a lawyer for important decisions.";

/// A titled free-text card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCard {
    pub icon: &'static str,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcernCard {
    pub severity: Severity,
    pub clause: String,
    pub concern: String,
    pub recommendation: String,
}

impl From<&Concern> for ConcernCard {
    fn from(c: &Concern) -> Self {
        Self {
            severity: c.severity,
            clause: c.clause.clone(),
            concern: c.concern.clone(),
            recommendation: c.recommendation.clone(),
        }
    }
}

/// Content of the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Text(TextCard),
    /// An empty concerns list: a single affirmation card.
    NoConcerns,
    /// Count header followed by one card per concern, in server order.
    Concerns { count: usize, cards: Vec<ConcernCard> },
}

impl ResultView {
    /// Number of cards this view renders.
    pub fn card_count(&self) -> usize {
        match self {
            Self::Text(_) | Self::NoConcerns => 1,
            Self::Concerns { cards, .. } => cards.len(),
        }
    }
}

pub fn analysis_view(doc_name: &str, analysis: &str) -> ResultView {
    ResultView::Text(TextCard {
        icon: ANALYSIS_ICON,
        title: format!("Analysis: {doc_name}"),
        text: analysis.to_string(),
    })
}

pub fn comparison_view(doc1: &str, doc2: &str, comparison: &str) -> ResultView {
    ResultView::Text(TextCard {
        icon: COMPARISON_ICON,
        title: format!("Comparison: {doc1} vs {doc2}"),
        text: comparison.to_string(),
    })
}

pub fn concerns_view(concerns: &[Concern]) -> ResultView {
    if concerns.is_empty() {
        return ResultView::NoConcerns;
    }
    ResultView::Concerns {
        count: concerns.len(),
        cards: concerns.iter().map(ConcernCard::from).collect(),
    }
}

/// Header line for a non-empty concerns list.
pub fn concerns_header(count: usize) -> String {
    let noun = if count == 1 { "Clause" } else { "Clauses" };
    format!("Found {count} Concerning {noun}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCardView {
    pub name: String,
    pub loaded_at: String,
    pub length: u64,
    pub reading_time: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentListView {
    Empty,
    Cards(Vec<DocumentCardView>),
}

impl DocumentListView {
    pub fn active(&self) -> Option<&DocumentCardView> {
        match self {
            Self::Empty => None,
            Self::Cards(cards) => cards.iter().find(|c| c.active),
        }
    }
}

fn document_card(doc: &DocumentDescriptor, current: Option<&str>) -> DocumentCardView {
    DocumentCardView {
        name: doc.name.clone(),
        loaded_at: doc.loaded_at_label(),
        length: doc.length,
        reading_time: doc.reading_time(),
        active: current == Some(doc.name.as_str()),
    }
}

pub fn document_list_view(session: &Session) -> DocumentListView {
    if session.documents().is_empty() {
        return DocumentListView::Empty;
    }
    DocumentListView::Cards(
        session
            .documents()
            .iter()
            .map(|d| document_card(d, session.current()))
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntryView {
    pub role: Role,
    pub content: String,
    pub failed: bool,
}

impl ChatEntryView {
    pub fn speaker(&self) -> &'static str {
        match self.role {
            Role::User => "You",
            Role::Bot => "Assistant",
        }
    }
}

pub fn chat_entry_view(message: &ChatMessage) -> ChatEntryView {
    ChatEntryView {
        role: message.role,
        content: message.content.clone(),
        failed: message.failed,
    }
}
