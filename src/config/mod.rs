//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y credenciales de los proveedores de pago.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;
