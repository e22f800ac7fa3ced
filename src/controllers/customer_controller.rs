use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::customer_dto::{CustomerDetailResponse, CustomerIdResponse, UpsertCustomerRequest};
use crate::models::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct CustomerController {
    repository: CustomerRepository,
    quotes: QuoteRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            quotes: QuoteRepository::new(pool),
        }
    }

    /// Alta o actualización por email; devuelve solo el id
    pub async fn upsert(&self, request: UpsertCustomerRequest) -> Result<CustomerIdResponse, AppError> {
        request.validate()?;

        let customer = self
            .repository
            .upsert(request.name.as_deref(), &request.email, request.phone.as_deref())
            .await?;

        Ok(CustomerIdResponse { id: customer.id })
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<CustomerDetailResponse, AppError> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;
        let quotes = self.quotes.find_by_customer(customer.id).await?;

        Ok(CustomerDetailResponse { customer, quotes })
    }
}
