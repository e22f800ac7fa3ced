//! Motor de precios
//!
//! Tabla estática de vehículos, catálogo de opciones y calculador de
//! presupuestos. Todo es puro y sin estado compartido.

pub mod calculator;
pub mod options;
pub mod vehicle_table;

pub use calculator::{calculate_price, PaymentMilestones, PriceBreakdown, QuoteSelection, DESIGN_FEE, MAX_SQFT};
pub use vehicle_table::{get_all_makes, get_models_for_make, VehicleCategory, VehicleModel};
