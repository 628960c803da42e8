//! Question endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::QuestionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, JsonQuery, QuestionIdPath, RequireAdmin};
use crate::http::server::AppState;
use crate::models::{parse_include_hidden, ListOrder, Question, QuestionText, VoteCount};

/// Create question request
#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
}

/// Query parameters for GET /api/questions
///
/// Kept as raw strings so bad values produce JSON validation errors.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub order: Option<String>,
    pub include_hidden: Option<String>,
}

impl ListParams {
    fn parse(&self) -> Result<(ListOrder, bool), ApiError> {
        let order = match self.order.as_deref() {
            Some(s) => s.parse::<ListOrder>()?,
            None => ListOrder::default(),
        };
        let include_hidden = match self.include_hidden.as_deref() {
            Some(s) => parse_include_hidden(s)?,
            None => false,
        };
        Ok((order, include_hidden))
    }
}

/// GET /api/questions - list questions
async fn list_questions(
    State(state): State<Arc<AppState>>,
    JsonQuery(params): JsonQuery<ListParams>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let (order, include_hidden) = params.parse()?;
    let questions = QuestionRepo::new(&state.pool)
        .list(order, include_hidden)
        .await?;

    tracing::debug!(order = order.as_str(), include_hidden, count = questions.len(), "listed questions");
    Ok(Json(questions))
}

/// POST /api/questions - submit a new question
async fn create_question(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let text = QuestionText::new(&req.text)?;
    let question = QuestionRepo::new(&state.pool).create(text).await?;

    tracing::info!(id = question.id, "question created");
    Ok((StatusCode::CREATED, Json(question)))
}

/// POST /api/questions/{id}/vote - add one vote
async fn vote_question(
    State(state): State<Arc<AppState>>,
    QuestionIdPath(id): QuestionIdPath,
) -> Result<Json<VoteCount>, ApiError> {
    let count = QuestionRepo::new(&state.pool).vote(id).await?;
    Ok(Json(count))
}

/// POST /api/questions/{id}/hide - hide from default listings (admin)
async fn hide_question(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    QuestionIdPath(id): QuestionIdPath,
) -> Result<Json<Question>, ApiError> {
    let question = QuestionRepo::new(&state.pool).hide(id).await?;

    tracing::info!(%id, "question hidden");
    Ok(Json(question))
}

/// POST /api/questions/{id}/unhide - restore to listings (admin)
async fn unhide_question(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    QuestionIdPath(id): QuestionIdPath,
) -> Result<Json<Question>, ApiError> {
    let question = QuestionRepo::new(&state.pool).unhide(id).await?;

    tracing::info!(%id, "question unhidden");
    Ok(Json(question))
}

/// DELETE /api/questions/{id} - remove permanently (admin)
async fn delete_question(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    QuestionIdPath(id): QuestionIdPath,
) -> Result<StatusCode, ApiError> {
    QuestionRepo::new(&state.pool).delete(id).await?;

    tracing::info!(%id, "question deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route("/api/questions/{id}", delete(delete_question))
        .route("/api/questions/{id}/vote", post(vote_question))
        .route("/api/questions/{id}/hide", post(hide_question))
        .route("/api/questions/{id}/unhide", post(unhide_question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_default() {
        let (order, include_hidden) = ListParams::default().parse().unwrap();
        assert_eq!(order, ListOrder::New);
        assert!(!include_hidden);
    }

    #[test]
    fn list_params_rejects_bad_values() {
        let params = ListParams {
            order: Some("oldest".into()),
            include_hidden: None,
        };
        assert!(matches!(params.parse(), Err(ApiError::Validation(_))));

        let params = ListParams {
            order: None,
            include_hidden: Some("maybe".into()),
        };
        assert!(matches!(params.parse(), Err(ApiError::Validation(_))));
    }
}
