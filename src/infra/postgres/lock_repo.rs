use crate::domain::{error::PaymentError, id::UserId};

/// Take the per-user lock. A second lock for the same user hits the primary
/// key and comes back as `AlreadyInProgress`.
pub async fn acquire(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: UserId,
) -> Result<(), PaymentError> {
    sqlx::query("INSERT INTO payment_locks (user_id) VALUES ($1)")
        .bind(user_id.get())
        .execute(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                PaymentError::AlreadyInProgress
            }
            other => PaymentError::Database(other),
        })?;
    Ok(())
}

/// Drop the user's lock. Returns `false` if there was no lock to drop.
pub async fn release(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: UserId,
) -> Result<bool, PaymentError> {
    let result = sqlx::query("DELETE FROM payment_locks WHERE user_id = $1")
        .bind(user_id.get())
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_locked(pool: &sqlx::PgPool, user_id: UserId) -> Result<bool, PaymentError> {
    let locked: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM payment_locks WHERE user_id = $1)")
            .bind(user_id.get())
            .fetch_one(pool)
            .await?;
    Ok(locked)
}
