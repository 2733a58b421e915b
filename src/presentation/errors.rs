// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::utils::errors::SeoError;

/// 应用错误类型
///
/// 把 `SeoError` 转换为 HTTP 响应：客户端或 robots 策略导致的错误返回 400，
/// 其余返回 500。响应体只有 `{"error": message}`，诊断信息只写日志
#[derive(Debug)]
pub struct AppError(SeoError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();

        if status.is_server_error() {
            error!(
                kind = self.0.kind().as_str(),
                detail = self.0.detail().unwrap_or(""),
                "Request failed: {}",
                error_message
            );
        } else {
            warn!(kind = self.0.kind().as_str(), "Request rejected: {}", error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<SeoError> for AppError {
    fn from(err: SeoError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self(SeoError::InvalidInput("Request must be JSON".to_string()))
    }
}
