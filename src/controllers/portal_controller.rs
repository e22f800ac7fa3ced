use sqlx::PgPool;

use crate::dto::portal_dto::{PortalCounts, PortalDashboardResponse, PortalOptions};
use crate::models::StatusDomain;
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::project_repository::ProjectRepository;
use crate::repositories::revision_repository::RevisionRepository;
use crate::utils::errors::AppResult;

use super::project_controller::ProjectController;

/// Portal del cliente: todo se filtra por el email del token
pub struct PortalController {
    orders: OrderRepository,
    projects: ProjectRepository,
    revisions: RevisionRepository,
}

impl PortalController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            revisions: RevisionRepository::new(pool),
        }
    }

    /// Opciones para el formulario de revisión (`projects` | `orders`)
    pub async fn data(&self, email: &str, data_type: Option<&str>) -> AppResult<PortalOptions> {
        match data_type {
            Some("projects") => Ok(PortalOptions::Projects(self.projects.options_by_email(email).await?)),
            Some("orders") => Ok(PortalOptions::Orders(self.revisions.order_options_by_email(email).await?)),
            _ => Ok(PortalOptions::Empty(Vec::new())),
        }
    }

    pub async fn dashboard(&self, email: &str) -> AppResult<PortalDashboardResponse> {
        let orders = self.orders.find_by_email(email).await?;
        let projects: Vec<_> = self
            .projects
            .find_by_email(email)
            .await?
            .into_iter()
            .map(ProjectController::to_response)
            .collect();
        let revisions = self.revisions.find_by_email(email).await?;

        let project_done = StatusDomain::Project.flow().last().copied();
        let counts = PortalCounts {
            orders: orders.len(),
            active_projects: projects
                .iter()
                .filter(|p| Some(p.project.status.as_str()) != project_done)
                .count(),
            pending_revisions: revisions
                .iter()
                .filter(|r| r.status == StatusDomain::Revision.initial())
                .count(),
        };

        Ok(PortalDashboardResponse {
            email: email.to_string(),
            orders,
            projects,
            revisions,
            counts,
        })
    }
}
