use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use domain::{Title, TodoId};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

pub const LIST_PATH: &str = "/todos";

/// POST /todos のフォーム入力
#[derive(Debug, Deserialize)]
pub struct CreateTodoForm {
    #[serde(default)]
    pub title: String,
}

/// パスの ID を解釈する。整数でなければどのレコードも指さないので 404。
pub(crate) fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let todos = state.repo.list_all()?;
    Ok(state.views.todo_list(&todos)?)
}

pub async fn new_todo_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(state.views.create_form("", None)?)
}

/// 検証に失敗したらフォームを 422 で再表示、成功したら一覧へリダイレクト
pub async fn create_todo(
    State(state): State<AppState>,
    Form(form): Form<CreateTodoForm>,
) -> Result<Response, ApiError> {
    let title = match Title::parse(form.title.as_str()) {
        Ok(title) => title,
        Err(e) => {
            tracing::warn!(error = %e, "Todo rejected by validation");
            let page = state.views.create_form(&form.title, Some(&e.to_string()))?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let todo = state.repo.insert(title)?;
    tracing::info!(todo_id = %todo.id, "Todo created");
    Ok(Redirect::to(LIST_PATH).into_response())
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_id(&raw_id)?;
    let todo = state.repo.find_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(state.views.confirm_delete(&todo)?)
}

/// 存在しない ID への削除は何もせず一覧へ戻す（二重送信を許容）
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = parse_id(&raw_id)?;

    if state.repo.find_by_id(id)?.is_some() {
        let removed = state.repo.delete(id)?;
        tracing::info!(todo_id = %id, removed, "Todo deleted");
    } else {
        tracing::debug!(todo_id = %id, "Delete requested for missing todo");
    }

    Ok(Redirect::to(LIST_PATH))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
