use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{ChangeSource, NewOrder, NewStatusChange, Order, PaymentConfirmation, StatusDomain};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::status_audit_repository::StatusAuditRepository;
use crate::utils::errors::AppError;

pub const DEPOSIT_PAID: &str = "deposit_paid";
pub const CONFIRMED: &str = "confirmed";

/// Resultado de aplicar una confirmación de pago
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Applied,
    /// El evento ya se había procesado (reintento del proveedor)
    Duplicate,
    /// El número de pedido no existe
    UnknownOrder,
}

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, order: &NewOrder) -> Result<Order, AppError> {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                order_number, customer_email, customer_name, vehicle_info, wrap_type, design_tier,
                total_price, deposit_amount, amount_paid, payment_provider, checkout_session_id,
                payment_status, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&order.order_number)
        .bind(&order.customer_email)
        .bind(&order.customer_name)
        .bind(&order.vehicle_info)
        .bind(&order.wrap_type)
        .bind(&order.design_tier)
        .bind(order.total_price)
        .bind(order.deposit_amount)
        .bind(&order.payment_provider)
        .bind(&order.checkout_session_id)
        .bind(StatusDomain::Payment.initial())
        .bind(StatusDomain::Order.initial())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn list(&self) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE LOWER(customer_email) = LOWER($1) ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Aplicar una confirmación de pago de forma idempotente.
    ///
    /// En una sola transacción: se registra `(provider, event_id)` en
    /// `webhook_events`; si ya existía el evento no tiene efecto. Si es nuevo
    /// se marca el depósito, se audita el cambio y se da de alta al cliente.
    pub async fn apply_confirmation(&self, confirmation: &PaymentConfirmation) -> Result<ConfirmationOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO webhook_events (provider, event_id, event_type, order_number)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (provider, event_id) DO NOTHING
            "#,
        )
        .bind(confirmation.provider)
        .bind(&confirmation.event_id)
        .bind(&confirmation.event_type)
        .bind(&confirmation.order_number)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            info!(
                "🔁 Evento {} de {} ya procesado, se ignora",
                confirmation.event_id, confirmation.provider
            );
            return Ok(ConfirmationOutcome::Duplicate);
        }

        let previous: Option<(Uuid, String, String)> = sqlx::query_as(
            "SELECT id, status, payment_status FROM orders WHERE order_number = $1 FOR UPDATE",
        )
        .bind(&confirmation.order_number)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((order_id, previous_status, previous_payment)) = previous else {
            // El evento queda registrado: un reintento no cambiará el resultado
            tx.commit().await?;
            warn!("⚠️ Pedido {} no encontrado para el pago", confirmation.order_number);
            return Ok(ConfirmationOutcome::UnknownOrder);
        };

        sqlx::query(
            r#"
            UPDATE orders SET
                payment_status = $2,
                status = $3,
                amount_paid = $4,
                payment_reference = $5,
                customer_email = COALESCE($6, customer_email),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .bind(DEPOSIT_PAID)
        .bind(CONFIRMED)
        .bind(confirmation.amount_paid)
        .bind(&confirmation.payment_reference)
        .bind(&confirmation.customer_email)
        .execute(&mut *tx)
        .await?;

        let actor = Some(format!("{}:{}", confirmation.provider, confirmation.event_id));
        for (field, domain, from, to) in [
            ("payment_status", StatusDomain::Payment, previous_payment, DEPOSIT_PAID),
            ("status", StatusDomain::Order, previous_status, CONFIRMED),
        ] {
            let change = NewStatusChange {
                entity: "orders",
                entity_id: order_id,
                field,
                domain,
                from_status: Some(from),
                to_status: to.to_string(),
                source: ChangeSource::Webhook,
                actor: actor.clone(),
            };
            StatusAuditRepository::record(&mut *tx, &change).await?;
        }

        if let Some(email) = confirmation.customer_email.as_deref() {
            CustomerRepository::upsert_with(&mut *tx, confirmation.customer_name.as_deref(), email, None).await?;
        }

        tx.commit().await?;

        info!(
            "💰 Depósito confirmado para {} ({} {})",
            confirmation.order_number, confirmation.amount_paid, confirmation.provider
        );
        Ok(ConfirmationOutcome::Applied)
    }
}
