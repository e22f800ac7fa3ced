use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::project_dto::{CreateProjectRequest, ProjectResponse};
use crate::models::{ChangeSource, Project, StatusDomain};
use crate::repositories::project_repository::ProjectRepository;
use crate::repositories::status_audit_repository::{StatusAuditRepository, PROJECT_STATUS};
use crate::utils::errors::{not_found_error, AppError};

pub struct ProjectController {
    repository: ProjectRepository,
    audit: StatusAuditRepository,
}

impl ProjectController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProjectRepository::new(pool.clone()),
            audit: StatusAuditRepository::new(pool),
        }
    }

    /// Proyecto con su barra de progreso y color de estado
    pub(crate) fn to_response(project: Project) -> ProjectResponse {
        let domain = StatusDomain::Project;
        ProjectResponse {
            progress: domain.progress_percent(&project.status),
            color: domain.color(&project.status),
            project,
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<ProjectResponse>, AppError> {
        let projects = self.repository.list(status).await?;
        Ok(projects.into_iter().map(Self::to_response).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ProjectResponse, AppError> {
        let project = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Project", &id.to_string()))?;
        Ok(Self::to_response(project))
    }

    pub async fn create(&self, request: CreateProjectRequest) -> Result<ProjectResponse, AppError> {
        request.validate()?;
        let project = self.repository.create(&request).await?;
        info!("🎨 Proyecto {} creado: {}", project.id, project.title);
        Ok(Self::to_response(project))
    }

    pub async fn update_status(&self, id: Uuid, status: &str, actor: &str) -> Result<ProjectResponse, AppError> {
        self.audit
            .write_status(PROJECT_STATUS, id, status, ChangeSource::Admin, Some(actor))
            .await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Project", &id.to_string()));
        }
        Ok(())
    }
}
