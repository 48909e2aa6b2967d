pub mod consumable_repository;
pub mod equipment_repository;
pub mod stock_ledger;
pub mod stock_repository;
