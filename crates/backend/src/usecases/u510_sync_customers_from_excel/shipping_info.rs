use serde::Serialize;

use super::file_reader::SheetRow;

/// Поле с Id заказа Shopify в документах продаж
pub const ORDER_ID_FIELD: &str = "shopify_order_id";
pub const SHIPPING_CUSTOMER_NAME_FIELD: &str = "shipping_customer_name";
pub const SHIPPING_ADDRESS_FIELD: &str = "shipping_address";
pub const SHIPPING_PHONE_FIELD: &str = "shipping_phone";

/// Колонки адреса в порядке склейки
const ADDRESS_COLUMNS: [&str; 6] = [
    "Shipping Street",
    "Shipping Address1",
    "Shipping City",
    "Shipping Province",
    "Shipping Zip",
    "Shipping Country",
];

/// Данные доставки, которые пишутся в заказ, счёт и накладные.
/// Имена полей совпадают с пользовательскими полями документов.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingInfo {
    pub shipping_customer_name: String,
    pub shipping_address: String,
    pub shipping_phone: String,
}

impl ShippingInfo {
    pub fn from_row(row: &SheetRow) -> Self {
        let shipping_address = ADDRESS_COLUMNS
            .iter()
            .filter_map(|col| row.get(col))
            .collect::<Vec<_>>()
            .join(", ");

        let shipping_customer_name = row
            .get("Shipping Name")
            .or_else(|| row.get("Email"))
            .unwrap_or_default()
            .to_string();

        Self {
            shipping_customer_name,
            shipping_address,
            shipping_phone: row.get("Phone").unwrap_or_default().to_string(),
        }
    }
}
