use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use groundrag_core::types::{HistoryEntry, Sender};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Verbatim answer before display shaping; AI messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_generator: Option<bool>,
}

impl Message {
    pub fn user(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self { sender: Sender::User, text: text.into(), raw_text: None, at, used_generator: None }
    }

    pub fn ai(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self { sender: Sender::Ai, text: text.into(), raw_text: None, at, used_generator: None }
    }

    pub fn answer(text: impl Into<String>, raw_text: impl Into<String>, used_generator: bool, at: DateTime<Utc>) -> Self {
        Self { raw_text: Some(raw_text.into()), used_generator: Some(used_generator), ..Self::ai(text, at) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Session {
    /// Messages as engine history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages.iter().map(|m| HistoryEntry::new(m.sender, m.text.clone())).collect()
    }

    /// Only the welcome message so far.
    pub fn awaiting_first_question(&self) -> bool {
        self.messages.len() <= 1
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            updated_at: self.updated_at,
            last_message: self.messages.last().map(|m| m.text.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub last_message: String,
}
