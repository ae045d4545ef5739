use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::payment::{WebhookNotification, WebhookOutcome},
        services::payment_service::reconcile_webhook,
    },
    axum::{Json, body::Bytes, extract::State},
};

/// Gateway notifications are always acknowledged unless we fail internally:
/// a non-2xx makes YooKassa redeliver, which only helps for faults on our side.
#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(external_id = tracing::field::Empty, event = tracing::field::Empty)
)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notification: WebhookNotification = match serde_json::from_slice(&body) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed webhook payload");
            return Ok(Json(serde_json::json!({
                "status": "Ok",
                "message": "Invalid webhook data",
            })));
        }
    };

    let span = tracing::Span::current();
    span.record("external_id", tracing::field::display(&notification.object.id));
    if let Some(event) = &notification.event {
        span.record("event", tracing::field::display(event));
    }

    match reconcile_webhook(&state.pool, &notification).await? {
        WebhookOutcome::Reconciled {
            payment_id, status, ..
        } => Ok(Json(serde_json::json!({
            "status": "Ok",
            "data": {
                "paymentId": payment_id,
                "status": status,
            },
        }))),
        WebhookOutcome::NotFound => Ok(Json(serde_json::json!({
            "status": "Ok",
            "message": "Payment not found",
        }))),
    }
}
