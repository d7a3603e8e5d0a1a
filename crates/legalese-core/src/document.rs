//! Shared record types exchanged with the legalese server.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout the server uses for `loaded_at`.
pub const LOADED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LOADED_AT_LABEL_FORMAT: &str = "%-d %b %Y, %H:%M";

const WORDS_PER_MINUTE: u64 = 200;
const CHARS_PER_WORD: u64 = 6;

/// Client-side summary of an uploaded document.
///
/// Names are unique within a server session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub name: String,
    /// Server-local timestamp string, kept verbatim.
    pub loaded_at: String,
    /// Extracted text length in characters.
    pub length: u64,
}

impl DocumentDescriptor {
    pub fn new(name: impl Into<String>, loaded_at: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            loaded_at: loaded_at.into(),
            length,
        }
    }

    /// Parse `loaded_at`, if it is in the server's usual layout.
    pub fn loaded_at_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.loaded_at, LOADED_AT_FORMAT).ok()
    }

    /// `loaded_at` as shown on a registry card, e.g. `1 Mar 2024, 09:30`.
    /// Unparseable timestamps are shown verbatim.
    pub fn loaded_at_label(&self) -> String {
        match self.loaded_at_time() {
            Some(ts) => ts.format(LOADED_AT_LABEL_FORMAT).to_string(),
            None => self.loaded_at.clone(),
        }
    }

    /// Rough reading time derived from the character count.
    pub fn reading_time(&self) -> String {
        reading_time(self.length.div_ceil(CHARS_PER_WORD))
    }
}

/// Format an estimated reading time for `words` words at 200 words/minute.
pub fn reading_time(words: u64) -> String {
    let minutes = words / WORDS_PER_MINUTE;
    if minutes < 1 {
        return "Less than 1 minute".to_string();
    }
    if minutes < 60 {
        let plural = if minutes > 1 { "s" } else { "" };
        return format!("{minutes} minute{plural}");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    let hours_plural = if hours > 1 { "s" } else { "" };
    let rest_plural = if rest != 1 { "s" } else { "" };
    format!("{hours} hour{hours_plural} {rest} minute{rest_plural}")
}

/// Shorten `text` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    const SUFFIX: &str = "...";
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(SUFFIX.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(SUFFIX);
    out
}

/// Three-level risk rating attached to a [`Concern`].
///
/// Parsing is case-insensitive. Anything unrecognised is treated as
/// [`Severity::Low`], the same badge a reader would see for an unrated clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// Strict parse; `None` for values outside the three levels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Lower-case name, also used as the badge class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🔴",
        }
    }
}

impl From<Option<String>> for Severity {
    fn from(s: Option<String>) -> Self {
        s.as_deref().and_then(Self::parse).unwrap_or_default()
    }
}

/// One flagged clause from a concerns analysis.
///
/// The text fields come from model output; missing or `null` values read as
/// empty strings so one bad field does not sink the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concern {
    #[serde(default)]
    pub severity: Severity,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clause: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub concern: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendation: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// A single transcript turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Set on bot turns that report a failed request instead of a reply.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            failed: false,
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            failed: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            failed: true,
        }
    }
}
