pub mod consumable_controller;
pub mod equipment_controller;
pub mod stats_controller;
pub mod stock_controller;
