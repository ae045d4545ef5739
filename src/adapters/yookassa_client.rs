use {
    crate::domain::{
        error::PaymentError,
        gateway::{CreatedPayment, GatewayPaymentRequest, PaymentGateway},
        id::ExternalPaymentId,
    },
    serde::{Deserialize, Serialize},
    std::{future::Future, pin::Pin},
};

pub const DEFAULT_API_URL: &str = "https://api.yookassa.ru/v3";
pub const PAYMENT_DESCRIPTION: &str = "Заказ №1";
const FALLBACK_ERROR_MESSAGE: &str = "YooKassa API error";

#[derive(Debug, Clone)]
pub struct YooKassaConfig {
    pub api_url: String,
    pub shop_id: String,
    pub secret_key: String,
    pub return_url: String,
}

pub struct YooKassaGateway {
    http: reqwest::Client,
    config: YooKassaConfig,
}

impl YooKassaGateway {
    pub fn new(config: YooKassaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn payments_url(&self) -> String {
        format!("{}/payments", self.config.api_url.trim_end_matches('/'))
    }
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CreatePaymentBody<'a> {
    amount: AmountBody,
    capture: bool,
    confirmation: ConfirmationRequest<'a>,
    description: &'a str,
    metadata: MetadataBody,
}

#[derive(Debug, Serialize)]
struct AmountBody {
    value: String,
    currency: &'static str,
}

#[derive(Debug, Serialize)]
struct ConfirmationRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    return_url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataBody {
    user_id: i64,
    payment_id: String,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    id: ExternalPaymentId,
    confirmation: Option<ConfirmationResponse>,
}

#[derive(Debug, Deserialize)]
struct ConfirmationResponse {
    confirmation_url: Option<String>,
}

/// Error body, e.g. `{"type":"error","id":"...","code":"invalid_request","description":"..."}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    id: Option<String>,
    code: Option<String>,
    description: Option<String>,
}

impl PaymentGateway for YooKassaGateway {
    fn create_payment<'a>(
        &'a self,
        request: &'a GatewayPaymentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedPayment, PaymentError>> + Send + 'a>> {
        Box::pin(async move { self.create_payment_inner(request).await })
    }
}

impl YooKassaGateway {
    async fn create_payment_inner(
        &self,
        request: &GatewayPaymentRequest,
    ) -> Result<CreatedPayment, PaymentError> {
        let body = CreatePaymentBody {
            amount: AmountBody {
                value: request.money.amount().to_string(),
                currency: request.money.currency().as_str(),
            },
            capture: true,
            confirmation: ConfirmationRequest {
                kind: "redirect",
                return_url: &self.config.return_url,
            },
            description: PAYMENT_DESCRIPTION,
            metadata: MetadataBody {
                user_id: request.user_id.get(),
                payment_id: request.payment_id.to_string(),
            },
        };

        let resp = self
            .http
            .post(self.payments_url())
            .basic_auth(&self.config.shop_id, Some(&self.config.secret_key))
            .header("Idempotence-Key", request.idempotency_key.to_string())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err: ErrorResponse = serde_json::from_str(&text).unwrap_or_default();
            return Err(PaymentError::Gateway {
                status: status.as_u16(),
                external_id: err.id,
                message: err
                    .description
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
                code: err.code,
            });
        }

        let payment: PaymentResponse = serde_json::from_str(&text)
            .map_err(|e| PaymentError::Provider(format!("unexpected YooKassa response: {e}")))?;

        Ok(CreatedPayment {
            external_id: payment.id,
            confirmation_url: payment.confirmation.and_then(|c| c.confirmation_url),
        })
    }
}

/// No response at all (connect error, timeout): report as a gateway failure
/// with status 500.
fn transport_error(e: reqwest::Error) -> PaymentError {
    tracing::error!(error = %e, "YooKassa request failed");
    PaymentError::Gateway {
        status: e.status().map_or(500, |s| s.as_u16()),
        external_id: None,
        message: FALLBACK_ERROR_MESSAGE.to_string(),
        code: None,
    }
}
