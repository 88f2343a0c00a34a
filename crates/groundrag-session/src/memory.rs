use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use groundrag_core::error::{Error, Result};

use crate::model::{Message, Session, SessionSummary};
use crate::SessionRepository;

/// Process-local sessions; lost on restart.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("session {id}"))
}

impl SessionRepository for InMemorySessionRepository {
    fn create(&self, welcome_message: &str) -> Session {
        let now = Utc::now();
        let mut sessions = self.sessions.write();
        let session = Session {
            id: format!("sess_{}", Uuid::new_v4().simple()),
            title: format!("Chat {}", sessions.len() + 1),
            created_at: now,
            updated_at: now,
            messages: vec![Message::ai(welcome_message, now)],
        };
        sessions.insert(session.id.clone(), session.clone());
        debug!(id = %session.id, "session created");
        session
    }

    fn get(&self, id: &str) -> Result<Session> {
        self.sessions.read().get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn append(&self, id: &str, messages: Vec<Message>) -> Result<Session> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.messages.extend(messages);
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    fn set_title(&self, id: &str, title: &str) -> Result<()> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.title = title.to_string();
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.sessions.write().remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    fn list(&self) -> Vec<SessionSummary> {
        let mut out: Vec<SessionSummary> = self.sessions.read().values().map(Session::summary).collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        out
    }
}
