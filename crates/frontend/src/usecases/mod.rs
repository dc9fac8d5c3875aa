pub mod u510_sync_customers_from_excel;
