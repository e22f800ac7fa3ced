pub mod catalog_controller;
pub mod checkout_controller;
pub mod customer_controller;
pub mod order_controller;
pub mod portal_controller;
pub mod pricing_controller;
pub mod project_controller;
pub mod quote_controller;
pub mod revision_controller;
pub mod vehicle_controller;
pub mod webhook_controller;
