use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::order_dto::{OrderResponse, UpdateOrderStatusRequest};
use crate::models::{ChangeSource, Order, StatusDomain};
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::status_audit_repository::{StatusAuditRepository, ORDER_STATUS, PAYMENT_STATUS};
use crate::utils::errors::{not_found_error, AppError};

pub struct OrderController {
    repository: OrderRepository,
    audit: StatusAuditRepository,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRepository::new(pool.clone()),
            audit: StatusAuditRepository::new(pool),
        }
    }

    fn to_response(order: Order) -> OrderResponse {
        OrderResponse {
            status_view: StatusDomain::Order.view(&order.status),
            payment_view: StatusDomain::Payment.view(&order.payment_status),
            order,
        }
    }

    pub async fn list(&self) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.repository.list().await?;
        Ok(orders.into_iter().map(Self::to_response).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<OrderResponse, AppError> {
        let order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Order", &id.to_string()))?;
        Ok(Self::to_response(order))
    }

    /// Cambia el estado del pedido y/o del pago; cada campo se audita por separado
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateOrderStatusRequest,
        actor: &str,
    ) -> Result<OrderResponse, AppError> {
        if request.status.is_none() && request.payment_status.is_none() {
            return Err(AppError::BadRequest("Nothing to update".to_string()));
        }

        if let Some(status) = request.status.as_deref() {
            self.audit
                .write_status(ORDER_STATUS, id, status, ChangeSource::Admin, Some(actor))
                .await?;
        }
        if let Some(payment_status) = request.payment_status.as_deref() {
            self.audit
                .write_status(PAYMENT_STATUS, id, payment_status, ChangeSource::Admin, Some(actor))
                .await?;
        }

        self.get(id).await
    }
}
