use crate::domain::error::PaymentError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so axum can render it.
pub struct ApiError(pub PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

fn fail(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "status": "Fail",
        "message": message,
    });
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            PaymentError::AlreadyInProgress => {
                fail(StatusCode::CONFLICT, "Payment already in progress")
            }
            PaymentError::Gateway {
                status,
                external_id,
                message,
                code,
            } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = serde_json::json!({
                    "status": "Fail",
                    "externalPaymentId": external_id,
                    "message": message,
                    "code": code,
                });
                (status, Json(body)).into_response()
            }
            PaymentError::Validation(msg) => fail(StatusCode::UNPROCESSABLE_ENTITY, &msg),
            PaymentError::Provider(msg) => {
                tracing::error!("provider error: {msg}");
                fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            PaymentError::Database(err) => {
                tracing::error!("database error: {err}");
                fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
