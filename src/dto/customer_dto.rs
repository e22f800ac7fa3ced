use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Customer, Quote};

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertCustomerRequest {
    pub name: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Email is required"))]
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerIdResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: Customer,
    pub quotes: Vec<Quote>,
}
