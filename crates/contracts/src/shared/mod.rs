pub mod export;
pub mod i18n;
pub mod notice;
pub mod report;
pub mod report_filter;
pub mod rpc;
