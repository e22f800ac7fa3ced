use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quote_dto::CreateQuoteRequest;
use crate::models::{Quote, StatusDomain};
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::AppError;

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert del cliente, alta del presupuesto y contador del cliente,
    /// todo en una transacción
    pub async fn create_with_customer(&self, request: &CreateQuoteRequest) -> Result<Quote, AppError> {
        let mut tx = self.pool.begin().await?;

        let customer = CustomerRepository::upsert_with(
            &mut *tx,
            Some(request.name.as_str()),
            &request.email,
            request.phone.as_deref(),
        )
        .await?;

        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (customer_id, name, email, phone, vehicle_info, wrap_type, message, reference_images, status)
            VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), COALESCE($6, ''), COALESCE($7, ''), $8, $9)
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(request.name.trim())
        .bind(request.email.trim().to_lowercase())
        .bind(&request.phone)
        .bind(&request.vehicle_info)
        .bind(&request.wrap_type)
        .bind(&request.message)
        .bind(&request.reference_images)
        .bind(StatusDomain::Quote.initial())
        .fetch_one(&mut *tx)
        .await?;

        CustomerRepository::increment_quotes(&mut *tx, customer.id).await?;

        tx.commit().await?;
        Ok(quote)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            r#"
            SELECT * FROM quotes
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(quotes)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY created_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(quotes)
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(quotes)
    }

    pub async fn update_notes(
        &self,
        id: Uuid,
        admin_notes: Option<&str>,
        quoted_price: Option<Decimal>,
    ) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET
                admin_notes = COALESCE($2, admin_notes),
                quoted_price = COALESCE($3, quoted_price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(admin_notes)
        .bind(quoted_price)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quote)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
