use {
    super::error::PaymentError,
    derive_more::Display,
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Owner of a payment and key of its lock row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<&str> for UserId {
    type Error = PaymentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| PaymentError::Validation(format!("userId must be an integer, got: {s}")))
    }
}

/// Payment identifier assigned by the gateway (YooKassa uses UUID-like strings
/// such as `2d8d0c5e-000f-5000-9000-1c9e0a6a4b11`, but we treat it as opaque).
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalPaymentId(String);

impl ExternalPaymentId {
    pub fn new(id: impl Into<String>) -> Result<Self, PaymentError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PaymentError::Validation(
                "external payment id must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ExternalPaymentId {
    type Error = PaymentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ExternalPaymentId> for String {
    fn from(id: ExternalPaymentId) -> Self {
        id.0
    }
}

/// Deduplication token sent to the gateway as `Idempotence-Key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(Uuid);

impl IdempotencyKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_numeric_strings() {
        assert_eq!(UserId::try_from(" 42 ").unwrap(), UserId::new(42));
        assert!(UserId::try_from("abc").is_err());
        assert!(UserId::try_from("1.5").is_err());
    }

    #[test]
    fn external_id_rejects_blank() {
        assert!(ExternalPaymentId::new("").is_err());
        assert!(ExternalPaymentId::new("   ").is_err());
        assert_eq!(ExternalPaymentId::new("ext1").unwrap().as_str(), "ext1");
    }

    #[test]
    fn external_id_validates_on_deserialize() {
        let err = serde_json::from_str::<ExternalPaymentId>("\"\"");
        assert!(err.is_err());
        let ok: ExternalPaymentId = serde_json::from_str("\"ext1\"").unwrap();
        assert_eq!(ok.into_inner(), "ext1");
    }

    #[test]
    fn idempotency_keys_are_unique() {
        assert_ne!(IdempotencyKey::generate(), IdempotencyKey::generate());
    }
}
