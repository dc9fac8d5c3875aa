pub mod reports;
pub mod u510_sync_customers;
