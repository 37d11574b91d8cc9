//! Todo Web アプリ（axum）
//!
//! ルーティングは `app_with_state` の表がすべてです。
//! ストアは `AppState` 経由で明示的にハンドラへ渡します。

use axum::{routing::get, Router};
use domain::Title;
use handlebars::TemplateError;
use infrastructure::{InMemoryTodoRepository, TodoRepository};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod handlers;
pub mod views;

pub use error::{ApiError, JsonError};
pub use views::Views;

/// アプリケーションの共有状態
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn TodoRepository>,
    pub views: Arc<Views>,
}

impl AppState {
    /// テンプレートを登録して状態を組み立てます。
    pub fn new(repo: Arc<dyn TodoRepository>) -> Result<Self, TemplateError> {
        Ok(Self {
            repo,
            views: Arc::new(Views::new()?),
        })
    }

    /// 空のインメモリストアを持つ状態
    pub fn in_memory() -> Result<Self, TemplateError> {
        Self::new(Arc::new(InMemoryTodoRepository::new()))
    }
}

/// 空のインメモリストアでルータを構築します。
pub fn app() -> Result<Router, TemplateError> {
    Ok(app_with_state(AppState::in_memory()?))
}

/// 外部から状態を注入できる版
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/todos/new", get(handlers::new_todo_form))
        .route(
            "/todos/:id/delete",
            get(handlers::confirm_delete).post(handlers::delete_todo),
        )
        .route("/health", get(api::health))
        .route("/api/todos", get(api::list_todos))
        .route("/api/todos/:id", get(api::get_todo))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 起動時の初期データを投入します。1 件でも検証に失敗したら何も投入しません。
pub fn seed_todos(repo: &dyn TodoRepository, titles: &[String]) -> anyhow::Result<usize> {
    let titles = titles
        .iter()
        .map(|raw| {
            Title::parse(raw.as_str())
                .map_err(|e| anyhow::anyhow!("invalid seed title {raw:?}: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let count = titles.len();
    for title in titles {
        repo.insert(title)?;
    }
    Ok(count)
}
