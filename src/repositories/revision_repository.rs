use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::portal_dto::OrderOption;
use crate::dto::revision_dto::CreateRevisionRequest;
use crate::models::{Revision, StatusDomain};
use crate::utils::errors::AppError;

pub struct RevisionRepository {
    pool: PgPool,
}

impl RevisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta con número correlativo por email (máximo existente + 1). El
    /// bloqueo consultivo serializa las altas concurrentes del mismo cliente.
    pub async fn create(&self, customer_email: &str, request: &CreateRevisionRequest) -> Result<Revision, AppError> {
        let email = customer_email.trim().to_lowercase();
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("revisions:{}", email))
            .execute(&mut *tx)
            .await?;

        let revision = sqlx::query_as::<_, Revision>(
            r#"
            INSERT INTO revisions (customer_email, project_id, order_id, revision_number, description, reference_images, status)
            SELECT $1, $2, $3, COALESCE(MAX(revision_number), 0) + 1, $4, $5, $6
            FROM revisions WHERE customer_email = $1
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(request.project_id)
        .bind(request.order_id)
        .bind(request.description.trim())
        .bind(&request.reference_images)
        .bind(StatusDomain::Revision.initial())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(revision)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Revision>, AppError> {
        let revision = sqlx::query_as::<_, Revision>("SELECT * FROM revisions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(revision)
    }

    pub async fn list(&self) -> Result<Vec<Revision>, AppError> {
        let revisions = sqlx::query_as::<_, Revision>("SELECT * FROM revisions ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(revisions)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Revision>, AppError> {
        let revisions = sqlx::query_as::<_, Revision>(
            "SELECT * FROM revisions WHERE customer_email = LOWER($1) ORDER BY revision_number DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(revisions)
    }

    pub async fn set_admin_response(&self, id: Uuid, response: &str) -> Result<Option<Revision>, AppError> {
        let revision = sqlx::query_as::<_, Revision>(
            "UPDATE revisions SET admin_response = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(response)
        .fetch_optional(&self.pool)
        .await?;
        Ok(revision)
    }

    /// Pedidos del cliente para el desplegable del formulario de revisión
    pub async fn order_options_by_email(&self, email: &str) -> Result<Vec<OrderOption>, AppError> {
        let options = sqlx::query_as::<_, OrderOption>(
            "SELECT id, order_number FROM orders WHERE LOWER(customer_email) = LOWER($1) ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(options)
    }
}
