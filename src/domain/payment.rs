use {
    super::error::PaymentError,
    super::id::{ExternalPaymentId, IdempotencyKey, UserId},
    super::money::{Currency, Money, MoneyAmount},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

/// Payment statuses as reported by the gateway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    WaitingForCapture,
    Succeeded,
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::WaitingForCapture => "waiting_for_capture",
            Self::Succeeded => "succeeded",
            Self::Canceled => "canceled",
        }
    }

    /// Succeeded and canceled are final on the gateway side.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = PaymentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "waiting_for_capture" => Ok(Self::WaitingForCapture),
            "succeeded" => Ok(Self::Succeeded),
            "canceled" => Ok(Self::Canceled),
            other => Err(PaymentError::Validation(format!(
                "unknown payment status: {other}"
            ))),
        }
    }
}

/// Full payment record from DB (for reads).
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: UserId,
    pub money: Money,
    pub status: PaymentStatus,
    pub idempotency_key: IdempotencyKey,
    pub external_payment_id: Option<ExternalPaymentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For INSERT: id generated in Rust via Uuid::now_v7(), idempotency key via v4.
#[derive(Debug, Clone)]
pub struct NewPayment {
    id: Uuid,
    user_id: UserId,
    money: Money,
    idempotency_key: IdempotencyKey,
}

impl NewPayment {
    pub fn new(user_id: UserId, amount: MoneyAmount) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            money: Money::new(amount, Currency::Rub),
            idempotency_key: IdempotencyKey::generate(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn money(&self) -> &Money {
        &self.money
    }

    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::Pending
    }

    pub fn idempotency_key(&self) -> IdempotencyKey {
        self.idempotency_key
    }
}

/// Result of a successful initiation.
#[derive(Debug, Clone)]
pub struct InitiatedPayment {
    pub payment_id: Uuid,
    pub external_payment_id: ExternalPaymentId,
    pub confirmation_url: String,
}

/// Gateway notification body. Only `object` is required; `event` is
/// informational and other top-level fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookNotification {
    pub event: Option<String>,
    pub object: WebhookObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookObject {
    pub id: ExternalPaymentId,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub status: PaymentStatus,
}

#[derive(Debug)]
pub enum WebhookOutcome {
    /// Status written and the user's lock released.
    Reconciled {
        payment_id: Uuid,
        status: PaymentStatus,
        lock_released: bool,
    },
    /// No payment carries this external id.
    NotFound,
}
