//! u510: данные доставки из выгрузки заказов Shopify.
//!
//! Файл загружается через `upload_file`, затем `sync_customers_from_excel`
//! сопоставляет строки с заказами по Id Shopify и дописывает имя, адрес и
//! телефон получателя в заказ, счёт и накладные.

pub mod error;
pub mod executor;
pub mod file_reader;
pub mod gateway;
pub mod shipping_info;
pub mod upload;

pub use error::SyncError;
pub use executor::SyncExecutor;
pub use gateway::{ErpSalesGateway, SalesDocumentGateway};
