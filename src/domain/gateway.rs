use {
    super::error::PaymentError,
    super::id::{ExternalPaymentId, IdempotencyKey, UserId},
    super::money::Money,
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

/// What the service layer asks the gateway to create.
#[derive(Debug, Clone)]
pub struct GatewayPaymentRequest {
    pub payment_id: Uuid,
    pub user_id: UserId,
    pub money: Money,
    pub idempotency_key: IdempotencyKey,
}

/// What the service layer gets back after the gateway accepted a payment.
/// The gateway's own status is not kept: it is only authoritative via webhook.
#[derive(Debug, Clone)]
pub struct CreatedPayment {
    pub external_id: ExternalPaymentId,
    pub confirmation_url: Option<String>,
}

pub trait PaymentGateway: Send + Sync {
    fn create_payment<'a>(
        &'a self,
        request: &'a GatewayPaymentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedPayment, PaymentError>> + Send + 'a>>;
}
