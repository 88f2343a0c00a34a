//! groundrag-session
//!
//! Chat sessions live outside the retrieval engine: the engine returns an
//! `Answer` and the caller decides what to record here.

pub mod memory;
pub mod model;
pub mod title;

pub use memory::InMemorySessionRepository;
pub use model::{Message, Session, SessionSummary};
pub use title::title_from_question;

use groundrag_core::error::Result;

/// Storage seam for chat sessions.
pub trait SessionRepository: Send + Sync {
    /// New session titled `Chat {n+1}`, seeded with one AI welcome message.
    fn create(&self, welcome_message: &str) -> Session;
    fn get(&self, id: &str) -> Result<Session>;
    /// Append messages and bump `updated_at`; returns the updated session.
    fn append(&self, id: &str, messages: Vec<Message>) -> Result<Session>;
    fn set_title(&self, id: &str, title: &str) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
    /// Summaries, most recently updated first.
    fn list(&self) -> Vec<SessionSummary>;
}
