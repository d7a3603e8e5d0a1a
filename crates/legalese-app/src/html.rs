//! HTML fragments for the view-models in [`crate::render`].
//!
//! Every server-supplied string is escaped before it reaches markup; free
//! text keeps its line breaks as `<br>`.

use std::fmt::Write;

use crate::render::*;
use crate::toast::Toast;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape and turn newlines into `<br>`.
fn text_block(s: &str) -> String {
    escape_html(s).replace("\r\n", "\n").replace('\n', "<br>")
}

pub fn render_result(view: &ResultView) -> String {
    match view {
        ResultView::Text(card) => format!(
            r#"<div class="result-card"><h3><span class="icon">{}</span> {}</h3><div class="result-text">{}</div></div>"#,
            card.icon,
            escape_html(&card.title),
            text_block(&card.text)
        ),
        ResultView::NoConcerns => format!(
            r#"<div class="result-card no-concerns"><h3><span class="icon">{NO_CONCERNS_ICON}</span> {NO_CONCERNS_TITLE}</h3><p>{NO_CONCERNS_TEXT}</p></div>"#
        ),
        ResultView::Concerns { count, cards } => {
            let mut out = format!(
                r#"<div class="concerns-header"><h3><span class="icon">{CONCERNS_ICON}</span> {}</h3></div>"#,
                concerns_header(*count)
            );
            for card in cards {
                out.push_str(&render_concern(card));
            }
            out
        }
    }
}

fn render_concern(card: &ConcernCard) -> String {
    let sev = card.severity;
    format!(
        concat!(
            r#"<div class="concern-card severity-{class}">"#,
            r#"<div class="concern-severity"><span class="badge badge-{class}">{emoji} {label}</span></div>"#,
            r#"<div class="concern-clause"><strong>Clause:</strong> "{clause}"</div>"#,
            r#"<div class="concern-text"><strong>Concern:</strong> {concern}</div>"#,
            r#"<div class="concern-recommendation"><strong>Recommendation:</strong> {rec}</div>"#,
            "</div>"
        ),
        class = sev.as_str(),
        emoji = sev.emoji(),
        label = sev.label(),
        clause = escape_html(&card.clause),
        concern = text_block(&card.concern),
        rec = text_block(&card.recommendation),
    )
}

pub fn render_documents(view: &DocumentListView) -> String {
    match view {
        DocumentListView::Empty => {
            format!(r#"<p class="empty-state">{EMPTY_REGISTRY_MESSAGE}</p>"#)
        }
        DocumentListView::Cards(cards) => {
            let mut out = String::new();
            for card in cards {
                let class = if card.active {
                    "document-card active"
                } else {
                    "document-card"
                };
                let _ = write!(
                    out,
                    r#"<div class="{class}" data-name="{name}"><h4>📄 {name}</h4><p class="doc-meta">{loaded}</p><p class="doc-meta">{length} characters · {reading}</p></div>"#,
                    name = escape_html(&card.name),
                    loaded = escape_html(&card.loaded_at),
                    length = card.length,
                    reading = card.reading_time,
                );
            }
            out
        }
    }
}

pub fn render_chat_entry(entry: &ChatEntryView) -> String {
    let role = match entry.role {
        legalese_core::Role::User => "user",
        legalese_core::Role::Bot => "bot",
    };
    let class = if entry.failed {
        format!("message {role}-message error-message")
    } else {
        format!("message {role}-message")
    };
    format!(
        r#"<div class="{class}"><div class="message-content">{}</div></div>"#,
        text_block(&entry.content)
    )
}

pub fn render_toast(toast: &Toast) -> String {
    format!(
        r#"<div class="toast toast-{}">{}</div>"#,
        toast.kind.as_str(),
        escape_html(&toast.message)
    )
}
