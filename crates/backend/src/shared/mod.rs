pub mod config;
pub mod erp;
pub mod logging;
