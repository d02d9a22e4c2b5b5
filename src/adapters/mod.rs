pub mod booking_ledger;
pub mod memory_catalog;
pub mod reservations_api;
