use serde::{Deserialize, Serialize};

/// Цвет для статусов, которых нет в справочнике
pub const FALLBACK_STATUS_COLOR: &str = "#6c757d";

/// Статусы доставки заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Returned")]
    Returned,
    #[serde(rename = "Lost")]
    Lost,
}

impl ShippingStatus {
    /// Значение в том виде, в каком оно хранится в ERP
    pub fn label(&self) -> &'static str {
        match self {
            ShippingStatus::Pending => "Pending",
            ShippingStatus::InTransit => "In Transit",
            ShippingStatus::OutForDelivery => "Out for Delivery",
            ShippingStatus::Delivered => "Delivered",
            ShippingStatus::Returned => "Returned",
            ShippingStatus::Lost => "Lost",
        }
    }

    /// Цвет подсветки статуса в отчётах
    pub fn color(&self) -> &'static str {
        match self {
            ShippingStatus::Pending => "#ffa00a",
            ShippingStatus::InTransit => "#7cd6fd",
            ShippingStatus::OutForDelivery => "#743ee2",
            ShippingStatus::Delivered => "#28a745",
            ShippingStatus::Returned => "#dc3545",
            ShippingStatus::Lost => "#6c757d",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.label() == label)
    }

    /// Цвет для произвольной строки статуса (с fallback)
    pub fn color_for(label: &str) -> &'static str {
        Self::from_label(label)
            .map(|s| s.color())
            .unwrap_or(FALLBACK_STATUS_COLOR)
    }

    pub fn all() -> Vec<ShippingStatus> {
        vec![
            ShippingStatus::Pending,
            ShippingStatus::InTransit,
            ShippingStatus::OutForDelivery,
            ShippingStatus::Delivered,
            ShippingStatus::Returned,
            ShippingStatus::Lost,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for status in ShippingStatus::all() {
            assert_eq!(ShippingStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(ShippingStatus::from_label("pending"), None);
    }

    #[test]
    fn test_color_for_unknown_uses_fallback() {
        assert_eq!(ShippingStatus::color_for("Delivered"), "#28a745");
        assert_eq!(ShippingStatus::color_for("Stuck at customs"), FALLBACK_STATUS_COLOR);
    }
}
