use serde::{Deserialize, Serialize};

use crate::models::{Order, StatusView};

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub status_view: StatusView,
    pub payment_view: StatusView,
}
