use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use groundrag_core::types::Answer;
use groundrag_session::{title_from_question, Message, Session, SessionSummary};

use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub answer: String,
    pub raw_answer: String,
    pub context_used: String,
    pub used_generator: bool,
}

impl From<Answer> for AskResponse {
    fn from(a: Answer) -> Self {
        Self { answer: a.answer, raw_answer: a.raw_answer, context_used: a.context_used, used_generator: a.used_generator }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "chunks": state.engine.store().len() }))
}

pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.sessions.list())
}

pub async fn create_session(State(state): State<AppState>) -> Json<Session> {
    let session = state.sessions.create(&state.welcome_message);
    info!(id = %session.id, title = %session.title, "session created");
    Json(session)
}

pub async fn get_session(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.sessions.get(&id)?.messages))
}

pub async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    state.sessions.delete(&id)?;
    Ok(Json(json!({ "success": true })))
}

pub async fn ask(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question is required".into()));
    }
    let session = state.sessions.get(&id)?;
    let answer = state.engine.answer(question, &session.history()).await?;

    if !answer.refused {
        if session.awaiting_first_question() {
            state.sessions.set_title(&id, &title_from_question(question))?;
        }
        let now = Utc::now();
        state.sessions.append(
            &id,
            vec![
                Message::user(question, now),
                Message::answer(answer.answer.clone(), answer.raw_answer.clone(), answer.used_generator, now),
            ],
        )?;
    }
    Ok(Json(answer.into()))
}
