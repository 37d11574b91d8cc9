//! HTML ビュー（handlebars）
//!
//! テンプレートは起動時に 1 度だけ登録します。ユーザー入力のエスケープは
//! handlebars の既定のエスケープに任せます。

use axum::response::Html;
use domain::{Todo, TITLE_MAX_CHARS};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

const TODO_LIST: &str = "todo_list";
const CREATE_FORM: &str = "create_form";
const CONFIRM_DELETE: &str = "confirm_delete";

/// 状態を持たないエラーページ（ユーザー入力を含まない）
const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n\
<head><meta charset=\"utf-8\"><title>Not found - Todo</title></head>\n\
<body>\n<main>\n<h1>Not found</h1>\n<p><a href=\"/todos\">Back to list</a></p>\n</main>\n</body>\n</html>\n";

const SERVER_ERROR_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n\
<head><meta charset=\"utf-8\"><title>Error - Todo</title></head>\n\
<body>\n<main>\n<h1>Error</h1>\n<p>An error occurred while processing your request.</p>\n</main>\n</body>\n</html>\n";

/// テンプレートに渡す 1 行分の表示用データ
#[derive(Debug, Serialize)]
struct TodoRow<'a> {
    id: String,
    title: &'a str,
    completed: &'static str,
    created: String,
}

impl<'a> From<&'a Todo> for TodoRow<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: &todo.title,
            completed: if todo.completed { "Yes" } else { "No" },
            created: todo.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// 登録済みテンプレート群
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("header", include_str!("../templates/header.hbs"))?;
        registry.register_partial("footer", include_str!("../templates/footer.hbs"))?;
        registry.register_template_string(TODO_LIST, include_str!("../templates/todo_list.hbs"))?;
        registry
            .register_template_string(CREATE_FORM, include_str!("../templates/create_form.hbs"))?;
        registry.register_template_string(
            CONFIRM_DELETE,
            include_str!("../templates/confirm_delete.hbs"),
        )?;
        Ok(Self { registry })
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<Html<String>, RenderError> {
        self.registry.render(name, data).map(Html)
    }

    /// 一覧ページ（新しい順に並んだ Todo を受け取る）
    pub fn todo_list(&self, todos: &[Todo]) -> Result<Html<String>, RenderError> {
        let rows: Vec<TodoRow<'_>> = todos.iter().map(TodoRow::from).collect();
        self.render(TODO_LIST, &json!({ "page_title": "Todos", "todos": rows }))
    }

    /// 作成フォーム。検証エラー時は入力値とメッセージを戻して再表示する。
    pub fn create_form(&self, value: &str, error: Option<&str>) -> Result<Html<String>, RenderError> {
        self.render(
            CREATE_FORM,
            &json!({
                "page_title": "Create todo",
                "value": value,
                "error": error,
                "max": TITLE_MAX_CHARS,
            }),
        )
    }

    pub fn confirm_delete(&self, todo: &Todo) -> Result<Html<String>, RenderError> {
        self.render(
            CONFIRM_DELETE,
            &json!({ "page_title": "Delete todo", "todo": TodoRow::from(todo) }),
        )
    }
}

pub fn not_found() -> Html<&'static str> {
    Html(NOT_FOUND_PAGE)
}

pub fn server_error() -> Html<&'static str> {
    Html(SERVER_ERROR_PAGE)
}
