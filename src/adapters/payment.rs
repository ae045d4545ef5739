use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{error::PaymentError, id::UserId, money::MoneyAmount},
        services::payment_service::initiate_payment,
    },
    axum::{
        Json,
        extract::{State, rejection::JsonRejection},
    },
    serde::Deserialize,
};

/// Clients send both `1` and `"1"`, `100.5` and `"100.50"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub user_id: NumberOrString,
    pub amount: NumberOrString,
}

impl CreatePaymentRequest {
    fn user_id(&self) -> Result<UserId, PaymentError> {
        match &self.user_id {
            NumberOrString::Number(n) => n.as_i64().map(UserId::new).ok_or_else(|| {
                PaymentError::Validation(format!("userId must be an integer, got: {n}"))
            }),
            NumberOrString::Text(s) => UserId::try_from(s.as_str()),
        }
    }

    fn amount(&self) -> Result<MoneyAmount, PaymentError> {
        match &self.amount {
            NumberOrString::Number(n) => n.to_string().parse(),
            NumberOrString::Text(s) => s.parse(),
        }
    }
}

#[tracing::instrument(
    name = "create_payment",
    skip_all,
    fields(user_id = tracing::field::Empty)
)]
pub async fn create_payment_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload.map_err(|e| PaymentError::Validation(e.body_text()))?;
    let user_id = req.user_id()?;
    let amount = req.amount()?;

    tracing::Span::current().record("user_id", tracing::field::display(user_id));

    let initiated = initiate_payment(&state.pool, &*state.gateway, user_id, amount).await?;

    Ok(Json(serde_json::json!({
        "status": "Ok",
        "data": {
            "paymentId": initiated.payment_id,
            "confirmationUrl": initiated.confirmation_url,
        },
    })))
}
