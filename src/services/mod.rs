//! Services module
//!
//! Lógica que no pertenece a un único repositorio: proveedores de pago,
//! verificación de tokens e importación de la hoja de vehículos.

pub mod jwt_service;
pub mod payments;
pub mod vehicle_import_service;

pub use jwt_service::{IdentityClaims, JwtService};
pub use payments::{PaymentError, PaymentProvider};
