use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::quote_dto::{CreateQuoteRequest, CreateQuoteResponse, QuoteResponse, UpdateQuoteNotesRequest};
use crate::models::{ChangeSource, Quote, StatusDomain};
use crate::repositories::quote_repository::QuoteRepository;
use crate::repositories::status_audit_repository::{StatusAuditRepository, QUOTE_STATUS};
use crate::utils::errors::{not_found_error, AppError};

/// Sentido de un paso a lo largo del flujo canónico
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Advance,
    Back,
}

impl FlowStep {
    fn as_str(&self) -> &'static str {
        match self {
            FlowStep::Advance => "advance",
            FlowStep::Back => "back",
        }
    }
}

pub struct QuoteController {
    repository: QuoteRepository,
    audit: StatusAuditRepository,
}

impl QuoteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: QuoteRepository::new(pool.clone()),
            audit: StatusAuditRepository::new(pool),
        }
    }

    fn to_response(quote: Quote) -> QuoteResponse {
        let domain = StatusDomain::Quote;
        QuoteResponse {
            status_view: domain.view(&quote.status),
            next_status: domain.next_status(&quote.status),
            previous_status: domain.previous_status(&quote.status),
            quote,
        }
    }

    /// Formulario público de solicitud de presupuesto
    pub async fn create(&self, request: CreateQuoteRequest) -> Result<CreateQuoteResponse, AppError> {
        request.validate()?;

        let quote = self.repository.create_with_customer(&request).await?;
        info!("📝 Nuevo presupuesto {} de {}", quote.id, quote.email);

        Ok(CreateQuoteResponse {
            success: true,
            quote_id: quote.id,
        })
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<QuoteResponse>, AppError> {
        let quotes = self.repository.list(status).await?;
        Ok(quotes.into_iter().map(Self::to_response).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<QuoteResponse, AppError> {
        let quote = self.find(id).await?;
        Ok(Self::to_response(quote))
    }

    async fn find(&self, id: Uuid) -> Result<Quote, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Quote", &id.to_string()))
    }

    pub async fn update_status(&self, id: Uuid, status: &str, actor: &str) -> Result<QuoteResponse, AppError> {
        self.audit
            .write_status(QUOTE_STATUS, id, status, ChangeSource::Admin, Some(actor))
            .await?;
        self.get(id).await
    }

    /// Avanzar o retroceder un paso. Desde un estado fuera del flujo, o en un
    /// extremo, no hay paso posible.
    pub async fn step(&self, id: Uuid, step: FlowStep, actor: &str) -> Result<QuoteResponse, AppError> {
        let quote = self.find(id).await?;
        let domain = StatusDomain::Quote;
        let target = match step {
            FlowStep::Advance => domain.next_status(&quote.status),
            FlowStep::Back => domain.previous_status(&quote.status),
        }
        .ok_or_else(|| AppError::Conflict(format!("Cannot {} from status '{}'", step.as_str(), quote.status)))?;

        self.update_status(id, target, actor).await
    }

    pub async fn update_notes(&self, id: Uuid, request: UpdateQuoteNotesRequest) -> Result<QuoteResponse, AppError> {
        let quote = self
            .repository
            .update_notes(id, request.admin_notes.as_deref(), request.quoted_price)
            .await?
            .ok_or_else(|| not_found_error("Quote", &id.to_string()))?;
        Ok(Self::to_response(quote))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Quote", &id.to_string()));
        }
        info!("🗑️ Presupuesto {} eliminado", id);
        Ok(())
    }
}
