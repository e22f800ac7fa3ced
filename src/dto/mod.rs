//! DTOs de la API
//!
//! Requests y responses HTTP. Los modelos de base de datos viven en `models`.

pub mod api_response;
pub mod catalog_dto;
pub mod checkout_dto;
pub mod customer_dto;
pub mod order_dto;
pub mod portal_dto;
pub mod pricing_dto;
pub mod project_dto;
pub mod quote_dto;
pub mod revision_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
