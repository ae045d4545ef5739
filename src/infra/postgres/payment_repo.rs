use {
    crate::domain::{
        error::PaymentError,
        id::{ExternalPaymentId, IdempotencyKey, UserId},
        money::{Currency, Money, MoneyAmount},
        payment::{NewPayment, Payment, PaymentStatus},
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: i64,
    amount: i64,
    currency: String,
    status: String,
    idempotency_key: Uuid,
    external_payment_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: row.id,
            user_id: UserId::new(row.user_id),
            money: Money::new(
                MoneyAmount::new(row.amount)?,
                Currency::try_from(row.currency.as_str())?,
            ),
            status: PaymentStatus::try_from(row.status.as_str())?,
            idempotency_key: IdempotencyKey::from_uuid(row.idempotency_key),
            external_payment_id: row
                .external_payment_id
                .map(ExternalPaymentId::new)
                .transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PAYMENT_COLUMNS: &str = "id, user_id, amount, currency, status, idempotency_key, \
     external_payment_id, created_at, updated_at";

pub async fn insert_payment(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    payment: &NewPayment,
) -> Result<(), PaymentError> {
    sqlx::query(
        r#"
        INSERT INTO payments (id, user_id, amount, currency, status, idempotency_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(payment.id())
    .bind(payment.user_id().get())
    .bind(payment.money().amount().minor_units())
    .bind(payment.money().currency().as_str())
    .bind(payment.status().as_str())
    .bind(payment.idempotency_key().as_uuid())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Attach the gateway's identifier once it has accepted the payment.
pub async fn attach_external_id(
    pool: &PgPool,
    id: Uuid,
    external_id: &ExternalPaymentId,
) -> Result<(), PaymentError> {
    sqlx::query(
        "UPDATE payments SET external_payment_id = $1, updated_at = now() WHERE id = $2",
    )
    .bind(external_id.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_external_id(
    pool: &PgPool,
    external_id: &ExternalPaymentId,
) -> Result<Option<Payment>, PaymentError> {
    let row = sqlx::query_as::<_, PaymentRow>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE external_payment_id = $1"
    ))
    .bind(external_id.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(Payment::try_from).transpose()
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Payment>, PaymentError> {
    let row = sqlx::query_as::<_, PaymentRow>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Payment::try_from).transpose()
}

/// Write the gateway-reported status. Returns the owning user so the caller
/// can release the right lock in the same transaction.
pub async fn update_status(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
    status: PaymentStatus,
) -> Result<UserId, PaymentError> {
    let user_id: i64 = sqlx::query_scalar(
        "UPDATE payments SET status = $1, updated_at = now() WHERE id = $2 RETURNING user_id",
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(UserId::new(user_id))
}
