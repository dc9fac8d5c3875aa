use serde::{Deserialize, Serialize};

/// Статус взаиморасчётов со службой доставки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementStatus {
    All,
    Pending,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    #[serde(rename = "Fully Paid")]
    FullyPaid,
}

impl SettlementStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SettlementStatus::All => "All",
            SettlementStatus::Pending => "Pending",
            SettlementStatus::PartiallyPaid => "Partially Paid",
            SettlementStatus::FullyPaid => "Fully Paid",
        }
    }

    pub fn all() -> Vec<SettlementStatus> {
        vec![
            SettlementStatus::All,
            SettlementStatus::Pending,
            SettlementStatus::PartiallyPaid,
            SettlementStatus::FullyPaid,
        ]
    }
}
