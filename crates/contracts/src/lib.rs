//! Общие типы и чистая логика, разделяемые backend и frontend:
//! описания фильтров отчётов, форматтер ячеек, экспорт, RPC-конверт
//! и сценарий импорта клиентов Shopify.

pub mod dashboards;
pub mod enums;
pub mod shared;
pub mod usecases;
