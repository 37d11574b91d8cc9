//! JSON エンドポイント（ヘルスチェックと読み取り専用 API）

use axum::{
    extract::{Path, State},
    Json,
};
use domain::Todo;
use serde::Serialize;

use crate::error::{ApiError, JsonError};
use crate::handlers::parse_id;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
    pub todos: usize,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthBody>, JsonError> {
    Ok(Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        todos: state.repo.count()?,
    }))
}

/// GET /api/todos（新しい順）
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, JsonError> {
    Ok(Json(state.repo.list_all()?))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Todo>, JsonError> {
    let id = parse_id(&raw_id)?;
    let todo = state.repo.find_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(todo))
}
