use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;

use super::shipping_info::{ShippingInfo, ORDER_ID_FIELD};
use crate::shared::erp::{ErpClient, ErpError};

/// Документы продаж, в которые пишутся данные доставки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesDoctype {
    SalesOrder,
    SalesInvoice,
    DeliveryNote,
}

impl SalesDoctype {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesDoctype::SalesOrder => "Sales Order",
            SalesDoctype::SalesInvoice => "Sales Invoice",
            SalesDoctype::DeliveryNote => "Delivery Note",
        }
    }
}

/// Заказ с проставленным Id Shopify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRef {
    pub name: String,
    pub shopify_order_id: String,
}

/// Доступ к документам продаж в ERP
#[async_trait]
pub trait SalesDocumentGateway: Send + Sync {
    /// Заказы, созданные не раньше `since`, у которых задан Id Shopify
    async fn orders_since(&self, since: NaiveDate) -> Result<Vec<OrderRef>, ErpError>;

    /// Имена документов данного типа с указанным Id Shopify
    async fn documents_for_order(
        &self,
        doctype: SalesDoctype,
        shopify_order_id: &str,
    ) -> Result<Vec<String>, ErpError>;

    async fn write_shipping_info(
        &self,
        doctype: SalesDoctype,
        name: &str,
        info: &ShippingInfo,
    ) -> Result<(), ErpError>;
}

/// Реализация через REST API ERP
pub struct ErpSalesGateway {
    client: Arc<ErpClient>,
}

impl ErpSalesGateway {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SalesDocumentGateway for ErpSalesGateway {
    async fn orders_since(&self, since: NaiveDate) -> Result<Vec<OrderRef>, ErpError> {
        let filters = json!([
            ["creation", ">=", since.format("%Y-%m-%d").to_string()],
            [ORDER_ID_FIELD, "is", "set"],
        ]);
        let records = self
            .client
            .get_list(SalesDoctype::SalesOrder.as_str(), &filters, &["name", ORDER_ID_FIELD])
            .await?;

        Ok(records
            .iter()
            .filter_map(|r| {
                Some(OrderRef {
                    name: r.get("name")?.as_str()?.to_string(),
                    shopify_order_id: value_text(r.get(ORDER_ID_FIELD)?)?,
                })
            })
            .collect())
    }

    async fn documents_for_order(
        &self,
        doctype: SalesDoctype,
        shopify_order_id: &str,
    ) -> Result<Vec<String>, ErpError> {
        let filters = json!([[ORDER_ID_FIELD, "=", shopify_order_id]]);
        let records = self.client.get_list(doctype.as_str(), &filters, &["name"]).await?;
        Ok(records
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
            .collect())
    }

    async fn write_shipping_info(
        &self,
        doctype: SalesDoctype,
        name: &str,
        info: &ShippingInfo,
    ) -> Result<(), ErpError> {
        let values = serde_json::to_value(info).map_err(|e| ErpError::Parse {
            url: format!("{} {}", doctype.as_str(), name),
            reason: e.to_string(),
        })?;
        self.client.set_value(doctype.as_str(), name, &values).await
    }
}

/// Id заказа может прийти строкой или числом
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
