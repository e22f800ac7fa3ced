//! Escritura auditada de estados
//!
//! Cualquier valor de estado es aceptado (last-write-wins); cada escritura
//! deja una fila en `status_changes` con su clasificación respecto al flujo.

use sqlx::{PgExecutor, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{ChangeSource, NewStatusChange, StatusChange, StatusDomain, TransitionKind};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{field_error, validate_status_label};

/// Columna de estado editable de una tabla
#[derive(Debug, Clone, Copy)]
pub struct StatusField {
    pub table: &'static str,
    pub column: &'static str,
    pub domain: StatusDomain,
}

pub const QUOTE_STATUS: StatusField = StatusField { table: "quotes", column: "status", domain: StatusDomain::Quote };
pub const PROJECT_STATUS: StatusField = StatusField { table: "projects", column: "status", domain: StatusDomain::Project };
pub const ORDER_STATUS: StatusField = StatusField { table: "orders", column: "status", domain: StatusDomain::Order };
pub const PAYMENT_STATUS: StatusField = StatusField {
    table: "orders",
    column: "payment_status",
    domain: StatusDomain::Payment,
};
pub const REVISION_STATUS: StatusField = StatusField {
    table: "revisions",
    column: "status",
    domain: StatusDomain::Revision,
};

/// Resultado de una escritura de estado
#[derive(Debug, Clone)]
pub struct StatusWrite {
    pub previous: String,
    pub current: String,
    pub transition: TransitionKind,
}

pub struct StatusAuditRepository {
    pool: PgPool,
}

impl StatusAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar una fila de auditoría con el ejecutor dado (pool o transacción)
    pub async fn record<'e, E: PgExecutor<'e>>(executor: E, change: &NewStatusChange) -> Result<(), AppError> {
        let transition = change.transition();
        if transition == TransitionKind::Backward {
            warn!(
                "↩️ {} {} {}: {} -> {} (retroceso)",
                change.entity,
                change.entity_id,
                change.field,
                change.from_status.as_deref().unwrap_or("-"),
                change.to_status
            );
        }

        sqlx::query(
            r#"
            INSERT INTO status_changes (entity, entity_id, field, from_status, to_status, transition, source, actor)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(change.entity)
        .bind(change.entity_id)
        .bind(change.field)
        .bind(&change.from_status)
        .bind(&change.to_status)
        .bind(transition.as_str())
        .bind(change.source.as_str())
        .bind(&change.actor)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Cambiar un estado y auditarlo en una sola transacción
    pub async fn write_status(
        &self,
        field: StatusField,
        id: Uuid,
        status: &str,
        source: ChangeSource,
        actor: Option<&str>,
    ) -> Result<StatusWrite, AppError> {
        validate_status_label(status).map_err(|e| field_error("status", e))?;
        let status = status.trim();

        let mut tx = self.pool.begin().await?;

        // Los nombres de tabla/columna son constantes, nunca entrada del usuario
        let select = format!("SELECT {} FROM {} WHERE id = $1 FOR UPDATE", field.column, field.table);
        let previous: Option<(String,)> = sqlx::query_as(&select).bind(id).fetch_optional(&mut *tx).await?;
        let Some((previous,)) = previous else {
            return Err(not_found_error(field.table, &id.to_string()));
        };

        let update = format!(
            "UPDATE {} SET {} = $2, updated_at = NOW() WHERE id = $1",
            field.table, field.column
        );
        sqlx::query(&update).bind(id).bind(status).execute(&mut *tx).await?;

        let change = NewStatusChange {
            entity: field.table,
            entity_id: id,
            field: field.column,
            domain: field.domain,
            from_status: Some(previous.clone()),
            to_status: status.to_string(),
            source,
            actor: actor.map(str::to_string),
        };
        Self::record(&mut *tx, &change).await?;

        tx.commit().await?;

        let transition = change.transition();
        info!(
            "🔄 {} {} {}: {} -> {} ({})",
            field.table,
            id,
            field.column,
            previous,
            status,
            transition.as_str()
        );

        Ok(StatusWrite {
            previous,
            current: status.to_string(),
            transition,
        })
    }

    /// Historial de cambios de una entidad, del más antiguo al más reciente
    pub async fn history(&self, entity: &str, entity_id: Uuid) -> Result<Vec<StatusChange>, AppError> {
        let changes = sqlx::query_as::<_, StatusChange>(
            r#"
            SELECT * FROM status_changes
            WHERE entity = $1 AND entity_id = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(entity)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(changes)
    }
}
