use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storefront_core::{AppError, FieldMessages};
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
}

/// Field-level validation failure payload, keyed by property.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/unprocessable-entity-response.ts"
)]
pub struct UnprocessableEntityResponse {
    error: &'static str,
    #[ts(type = "Record<string, string>")]
    message: FieldMessages,
    #[serde(rename = "statusCode")]
    status_code: u16,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self.0 {
            AppError::Unprocessable(messages) => (
                status,
                Json(UnprocessableEntityResponse {
                    error: "UnprocessableEntity",
                    message: messages,
                    status_code: status.as_u16(),
                }),
            )
                .into_response(),
            error => (
                status,
                Json(ErrorResponse {
                    message: error.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
