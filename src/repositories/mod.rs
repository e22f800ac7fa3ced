//! Repositorios
//!
//! Acceso a PostgreSQL con consultas `query_as` en tiempo de ejecución.

pub mod catalog_repository;
pub mod customer_repository;
pub mod order_repository;
pub mod project_repository;
pub mod quote_repository;
pub mod revision_repository;
pub mod status_audit_repository;
pub mod vehicle_repository;
