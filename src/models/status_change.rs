//! Registro de auditoría de cambios de estado

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{StatusDomain, TransitionKind};

/// Origen del cambio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    Admin,
    Webhook,
}

impl ChangeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeSource::Admin => "admin",
            ChangeSource::Webhook => "webhook",
        }
    }
}

/// StatusChange - mapea a la tabla status_changes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusChange {
    pub id: i64,
    pub entity: String,
    pub entity_id: Uuid,
    pub field: String,
    pub from_status: Option<String>,
    pub to_status: String,
    pub transition: String,
    pub source: String,
    pub actor: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Cambio pendiente de registrar
#[derive(Debug, Clone)]
pub struct NewStatusChange {
    pub entity: &'static str,
    pub entity_id: Uuid,
    /// Columna modificada (status, payment_status)
    pub field: &'static str,
    pub domain: StatusDomain,
    pub from_status: Option<String>,
    pub to_status: String,
    pub source: ChangeSource,
    pub actor: Option<String>,
}

impl NewStatusChange {
    pub fn transition(&self) -> TransitionKind {
        match &self.from_status {
            Some(from) => self.domain.classify(from, &self.to_status),
            None => TransitionKind::OffFlow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: Option<&str>, to: &str) -> NewStatusChange {
        NewStatusChange {
            entity: "projects",
            entity_id: Uuid::nil(),
            field: "status",
            domain: StatusDomain::Project,
            from_status: from.map(str::to_string),
            to_status: to.to_string(),
            source: ChangeSource::Admin,
            actor: None,
        }
    }

    #[test]
    fn test_transition_classification() {
        assert_eq!(change(Some("design"), "approved").transition(), TransitionKind::Forward);
        assert_eq!(change(Some("completed"), "design").transition(), TransitionKind::Backward);
        assert_eq!(change(None, "design").transition(), TransitionKind::OffFlow);
    }
}
