use {
    crate::domain::{
        error::PaymentError,
        gateway::{GatewayPaymentRequest, PaymentGateway},
        id::UserId,
        money::MoneyAmount,
        payment::{InitiatedPayment, NewPayment, WebhookNotification, WebhookOutcome},
    },
    crate::infra::postgres::{lock_repo, payment_repo},
    sqlx::PgPool,
};

/// Lock the user, record a pending payment, then ask the gateway to create it.
///
/// The lock and the payment row commit together before the gateway is called.
/// If the gateway call fails afterwards the lock stays in place and the
/// payment keeps a null external id; nothing here releases it.
pub async fn initiate_payment(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    user_id: UserId,
    amount: MoneyAmount,
) -> Result<InitiatedPayment, PaymentError> {
    let payment = NewPayment::new(user_id, amount);

    let mut tx = pool.begin().await?;
    lock_repo::acquire(&mut tx, user_id).await?;
    payment_repo::insert_payment(&mut tx, &payment).await?;
    tx.commit().await?;

    tracing::info!(
        payment_id = %payment.id(),
        amount = %payment.money().amount(),
        "payment recorded, calling gateway"
    );

    let request = GatewayPaymentRequest {
        payment_id: payment.id(),
        user_id,
        money: payment.money().clone(),
        idempotency_key: payment.idempotency_key(),
    };

    let created = match gateway.create_payment(&request).await {
        Ok(created) => created,
        Err(e) => {
            tracing::warn!(
                payment_id = %payment.id(),
                error = %e,
                "gateway call failed, lock for user stays in place"
            );
            return Err(e);
        }
    };

    payment_repo::attach_external_id(pool, payment.id(), &created.external_id).await?;

    let confirmation_url = created.confirmation_url.ok_or_else(|| {
        PaymentError::Provider(format!(
            "gateway response for {} has no confirmation_url",
            created.external_id
        ))
    })?;

    tracing::info!(
        payment_id = %payment.id(),
        external_id = %created.external_id,
        "gateway accepted payment"
    );

    Ok(InitiatedPayment {
        payment_id: payment.id(),
        external_payment_id: created.external_id,
        confirmation_url,
    })
}

/// Apply a gateway notification: write the reported status and release the
/// owner's lock in one transaction.
pub async fn reconcile_webhook(
    pool: &PgPool,
    notification: &WebhookNotification,
) -> Result<WebhookOutcome, PaymentError> {
    let object = &notification.object;

    let Some(payment) = payment_repo::find_by_external_id(pool, &object.id).await? else {
        tracing::error!(
            external_id = %object.id,
            metadata = %serde_json::Value::Object(object.metadata.clone()),
            "payment not found for webhook"
        );
        return Ok(WebhookOutcome::NotFound);
    };

    let mut tx = pool.begin().await?;
    let user_id = payment_repo::update_status(&mut tx, payment.id, object.status).await?;
    // A final stored status means this payment already gave its lock back; any
    // lock row now belongs to a newer payment by the same user.
    let lock_released = if payment.status.is_final() {
        false
    } else {
        lock_repo::release(&mut tx, user_id).await?
    };
    tx.commit().await?;

    if lock_released && !object.status.is_final() {
        tracing::warn!(
            payment_id = %payment.id,
            status = %object.status,
            "lock released on a non-final status"
        );
    }

    if payment.status.is_final() {
        tracing::warn!(
            payment_id = %payment.id,
            "payment already final, notification likely redelivered; lock left untouched"
        );
    } else if !lock_released {
        tracing::warn!(
            payment_id = %payment.id,
            "no lock held for user"
        );
    }

    tracing::info!(
        payment_id = %payment.id,
        from = %payment.status,
        to = %object.status,
        "payment reconciled"
    );

    Ok(WebhookOutcome::Reconciled {
        payment_id: payment.id,
        status: object.status,
        lock_released,
    })
}
