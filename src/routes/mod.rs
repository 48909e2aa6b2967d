//! Routers de la API

pub mod consumable_routes;
pub mod equipment_routes;
pub mod report_routes;
pub mod stats_routes;
pub mod stock_routes;
