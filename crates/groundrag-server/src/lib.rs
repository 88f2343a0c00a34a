//! groundrag-server
//!
//! HTTP gateway: chat sessions plus the question endpoint, over a shared
//! `AnswerEngine` and a `SessionRepository`.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, serve, AppState};
