use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::portal_dto::ProjectOption;
use crate::dto::project_dto::CreateProjectRequest;
use crate::models::{Project, StatusDomain};
use crate::utils::errors::AppError;

pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, customer_name, customer_email, vehicle_info, wrap_type, cover_image,
                status, start_date, estimated_completion, notes, images, quote_id
            )
            VALUES (
                $1, COALESCE($2, ''), LOWER(COALESCE($3, '')), COALESCE($4, ''), COALESCE($5, ''),
                COALESCE($6, ''), $7, $8, $9, COALESCE($10, ''), $11, $12
            )
            RETURNING *
            "#,
        )
        .bind(request.title.trim())
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.vehicle_info)
        .bind(&request.wrap_type)
        .bind(&request.cover_image)
        .bind(StatusDomain::Project.initial())
        .bind(request.start_date)
        .bind(request.estimated_completion)
        .bind(&request.notes)
        .bind(&request.images)
        .bind(request.quote_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE LOWER(customer_email) = LOWER($1) ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    pub async fn options_by_email(&self, email: &str) -> Result<Vec<ProjectOption>, AppError> {
        let options = sqlx::query_as::<_, ProjectOption>(
            "SELECT id, title FROM projects WHERE LOWER(customer_email) = LOWER($1) ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(options)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
