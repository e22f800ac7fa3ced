use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::Customer;
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta o actualización por email. Los campos vacíos no pisan los existentes.
    pub async fn upsert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        name: Option<&str>,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, phone)
            VALUES (COALESCE($1, ''), $2, COALESCE($3, ''))
            ON CONFLICT (email) DO UPDATE SET
                name = COALESCE(NULLIF(EXCLUDED.name, ''), customers.name),
                phone = COALESCE(NULLIF(EXCLUDED.phone, ''), customers.phone),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(name.map(str::trim).filter(|n| !n.is_empty()))
        .bind(email.trim().to_lowercase())
        .bind(phone.map(str::trim).filter(|p| !p.is_empty()))
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    pub async fn upsert(&self, name: Option<&str>, email: &str, phone: Option<&str>) -> Result<Customer, AppError> {
        Self::upsert_with(&self.pool, name, email, phone).await
    }

    pub async fn increment_quotes<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE customers SET total_quotes = total_quotes + 1, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }
}
