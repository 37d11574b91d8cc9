use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use handlebars::RenderError;
use infrastructure::StoreError;
use thiserror::Error;

use crate::views;

/// ページハンドラのエラー（HTML で応答）
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアントに見せるメッセージ（内部エラーの詳細は出さない）
    fn public_message(&self) -> String {
        match self {
            ApiError::NotFound => self.to_string(),
            ApiError::Store(_) | ApiError::Render(_) => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let page = match &self {
            ApiError::NotFound => views::not_found(),
            ApiError::Store(_) | ApiError::Render(_) => views::server_error(),
        };
        (self.status(), page).into_response()
    }
}

/// JSON API 用のエラー（`{"error": ...}` で応答）
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl From<ApiError> for JsonError {
    fn from(e: ApiError) -> Self {
        JsonError(e)
    }
}

impl From<StoreError> for JsonError {
    fn from(e: StoreError) -> Self {
        JsonError(ApiError::Store(e))
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let JsonError(error) = self;
        error.log();
        let body = serde_json::json!({ "error": error.public_message() });
        (error.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_error_maps_to_500_without_details() {
        let error = ApiError::from(StoreError::LockPoisoned);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "Internal server error");
    }

    #[test]
    fn render_error_maps_to_500_page() {
        let error = ApiError::from(RenderError::new("template missing"));
        assert_eq!(error.public_message(), "Internal server error");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_error_keeps_status() {
        let response = JsonError::from(ApiError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
