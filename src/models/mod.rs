//! Modelos de datos
//!
//! Filas de PostgreSQL y vocabulario de estados compartido por pedidos,
//! pagos, presupuestos, proyectos y revisiones.

pub mod customer;
pub mod order;
pub mod portfolio;
pub mod product;
pub mod project;
pub mod quote;
pub mod revision;
pub mod status;
pub mod status_change;
pub mod vehicle;

pub use customer::Customer;
pub use order::{NewOrder, Order, PaymentConfirmation};
pub use portfolio::{PortfolioImage, PortfolioVideo};
pub use product::Product;
pub use project::Project;
pub use quote::Quote;
pub use revision::Revision;
pub use status::{StatusColor, StatusDomain, StatusView, TransitionKind};
pub use status_change::{ChangeSource, NewStatusChange, StatusChange};
pub use vehicle::{NewVehicle, Vehicle};
