pub mod settlement_status;
pub mod shipping_status;

pub use settlement_status::SettlementStatus;
pub use shipping_status::ShippingStatus;
