use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::revision_dto::{CreateRevisionRequest, CreateRevisionResponse, RespondRevisionRequest};
use crate::models::{ChangeSource, Revision};
use crate::repositories::revision_repository::RevisionRepository;
use crate::repositories::status_audit_repository::{StatusAuditRepository, REVISION_STATUS};
use crate::utils::errors::{not_found_error, AppError};

pub struct RevisionController {
    repository: RevisionRepository,
    audit: StatusAuditRepository,
}

impl RevisionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RevisionRepository::new(pool.clone()),
            audit: StatusAuditRepository::new(pool),
        }
    }

    /// Solicitud de revisión del cliente autenticado
    pub async fn create(&self, customer_email: &str, request: CreateRevisionRequest) -> Result<CreateRevisionResponse, AppError> {
        request.validate()?;

        let revision = self.repository.create(customer_email, &request).await?;
        info!(
            "✏️ Revisión #{} de {} registrada",
            revision.revision_number, revision.customer_email
        );

        Ok(CreateRevisionResponse {
            id: revision.id,
            revision_number: revision.revision_number,
        })
    }

    pub async fn list(&self) -> Result<Vec<Revision>, AppError> {
        self.repository.list().await
    }

    /// Respuesta del administrador y/o cambio de estado (auditado)
    pub async fn respond(&self, id: Uuid, request: RespondRevisionRequest, actor: &str) -> Result<Revision, AppError> {
        if let Some(response) = request.admin_response.as_deref() {
            self.repository
                .set_admin_response(id, response)
                .await?
                .ok_or_else(|| not_found_error("Revision", &id.to_string()))?;
        }

        if let Some(status) = request.status.as_deref() {
            self.audit
                .write_status(REVISION_STATUS, id, status, ChangeSource::Admin, Some(actor))
                .await?;
        }

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Revision", &id.to_string()))
    }
}
