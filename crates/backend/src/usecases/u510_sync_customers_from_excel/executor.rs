use contracts::usecases::u510_sync_customers_from_excel::{ImportResult, RowError, SyncCustomersRequest};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::error::SyncError;
use super::file_reader::{earliest_created_date, index_by_order_id, read_rows};
use super::gateway::{OrderRef, SalesDocumentGateway, SalesDoctype};
use super::shipping_info::ShippingInfo;
use crate::shared::erp::ErpError;

/// Executor синхронизации данных доставки из выгрузки Shopify
pub struct SyncExecutor {
    gateway: Arc<dyn SalesDocumentGateway>,
    public_dir: PathBuf,
}

impl SyncExecutor {
    pub fn new(gateway: Arc<dyn SalesDocumentGateway>, public_dir: PathBuf) -> Self {
        Self { gateway, public_dir }
    }

    /// Выполнить синхронизацию по ранее загруженному файлу.
    ///
    /// Ошибка по отдельному заказу не прерывает обработку остальных.
    pub async fn sync(&self, request: &SyncCustomersRequest) -> Result<ImportResult, SyncError> {
        let file_url = request.file_url.trim();
        if file_url.is_empty() {
            return Err(SyncError::MissingFileUrl);
        }

        let path = resolve_file_path(&self.public_dir, file_url)?;
        tracing::info!("Starting customer sync from {}", path.display());

        let rows = tokio::task::spawn_blocking(move || read_rows(&path))
            .await
            .map_err(|e| SyncError::ReadFailed(e.to_string()))??;

        let date_from = earliest_created_date(&rows);
        let by_order_id = index_by_order_id(&rows);
        let orders = self.gateway.orders_since(date_from).await?;
        tracing::info!(
            "Got {} rows with Id, {} sales orders since {}",
            by_order_id.len(),
            orders.len(),
            date_from
        );

        let mut result = ImportResult::default();

        for order in &orders {
            let Some(row) = by_order_id.get(order.shopify_order_id.trim()) else {
                result.skipped += 1;
                continue;
            };

            let info = ShippingInfo::from_row(row);
            match self.apply(order, &info).await {
                Ok(()) => result.updated += 1,
                Err(ErpError::NotFound(what)) => {
                    tracing::warn!("Skipping order {}: {} not found", order.name, what);
                    result.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to update order {}: {}", order.name, e);
                    result.errors.push(RowError {
                        row: row.line,
                        error: format!("{}: {}", order.name, e),
                    });
                }
            }
        }

        tracing::info!(
            "Customer sync finished: updated={}, skipped={}, errors={}",
            result.updated,
            result.skipped,
            result.errors.len()
        );
        Ok(result)
    }

    /// Заказ, первый счёт с тем же Id и все накладные
    async fn apply(&self, order: &OrderRef, info: &ShippingInfo) -> Result<(), ErpError> {
        self.gateway
            .write_shipping_info(SalesDoctype::SalesOrder, &order.name, info)
            .await?;

        let invoices = self
            .gateway
            .documents_for_order(SalesDoctype::SalesInvoice, &order.shopify_order_id)
            .await?;
        if let Some(invoice) = invoices.first() {
            self.gateway
                .write_shipping_info(SalesDoctype::SalesInvoice, invoice, info)
                .await?;
        }

        let notes = self
            .gateway
            .documents_for_order(SalesDoctype::DeliveryNote, &order.shopify_order_id)
            .await?;
        for note in &notes {
            self.gateway
                .write_shipping_info(SalesDoctype::DeliveryNote, note, info)
                .await?;
        }

        Ok(())
    }
}

/// `<public>/<url без ведущего />`, иначе `<public>/files/<имя файла>`
pub fn resolve_file_path(public_dir: &Path, file_url: &str) -> Result<PathBuf, SyncError> {
    let relative = Path::new(file_url.trim_start_matches('/'));
    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(SyncError::FileNotFound(file_url.to_string()));
    }

    let direct = public_dir.join(relative);
    if direct.is_file() {
        return Ok(direct);
    }

    if let Some(name) = relative.file_name() {
        let in_files = public_dir.join("files").join(name);
        if in_files.is_file() {
            return Ok(in_files);
        }
    }

    Err(SyncError::FileNotFound(file_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// ERP в памяти: заказы, документы по Id и журнал записей
    #[derive(Default)]
    struct FakeGateway {
        orders: Vec<OrderRef>,
        documents: HashMap<(SalesDoctype, String), Vec<String>>,
        missing: HashSet<String>,
        failing: HashSet<String>,
        since: Mutex<Option<NaiveDate>>,
        writes: Mutex<Vec<(SalesDoctype, String, ShippingInfo)>>,
    }

    impl FakeGateway {
        fn order(mut self, name: &str, id: &str) -> Self {
            self.orders.push(OrderRef {
                name: name.into(),
                shopify_order_id: id.into(),
            });
            self
        }

        fn document(mut self, doctype: SalesDoctype, id: &str, name: &str) -> Self {
            self.documents
                .entry((doctype, id.to_string()))
                .or_default()
                .push(name.to_string());
            self
        }
    }

    #[async_trait]
    impl SalesDocumentGateway for FakeGateway {
        async fn orders_since(&self, since: NaiveDate) -> Result<Vec<OrderRef>, ErpError> {
            *self.since.lock().unwrap() = Some(since);
            Ok(self.orders.clone())
        }

        async fn documents_for_order(
            &self,
            doctype: SalesDoctype,
            shopify_order_id: &str,
        ) -> Result<Vec<String>, ErpError> {
            Ok(self
                .documents
                .get(&(doctype, shopify_order_id.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        async fn write_shipping_info(
            &self,
            doctype: SalesDoctype,
            name: &str,
            info: &ShippingInfo,
        ) -> Result<(), ErpError> {
            if self.missing.contains(name) {
                return Err(ErpError::NotFound(name.to_string()));
            }
            if self.failing.contains(name) {
                return Err(ErpError::Remote {
                    status: 417,
                    message: "Document is locked".into(),
                });
            }
            self.writes
                .lock()
                .unwrap()
                .push((doctype, name.to_string(), info.clone()));
            Ok(())
        }
    }

    fn public_dir_with(name: &str, contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("files")).unwrap();
        std::fs::write(dir.path().join("files").join(name), contents).unwrap();
        dir
    }

    const EXPORT: &str = "Id,Shipping Name,Email,Shipping City,Phone,Created at\n\
        1001,Mona,,Cairo,+20100,2024-03-05 10:00:00 +0200\n\
        1002,,b@x.io,Giza,,2024-02-10 09:00:00 +0200\n\
        1003,Omar,,Alex,,2024-03-01\n";

    #[tokio::test]
    async fn test_sync_updates_related_documents() {
        let dir = public_dir_with("orders.csv", EXPORT);
        let gateway = Arc::new(
            FakeGateway::default()
                .order("SO-1", "1001")
                .order("SO-2", "1002")
                .order("SO-9", "9999")
                .document(SalesDoctype::SalesInvoice, "1001", "SI-1")
                .document(SalesDoctype::SalesInvoice, "1001", "SI-1b")
                .document(SalesDoctype::DeliveryNote, "1001", "DN-1")
                .document(SalesDoctype::DeliveryNote, "1001", "DN-2"),
        );
        let executor = SyncExecutor::new(gateway.clone(), dir.path().to_path_buf());

        let result = executor
            .sync(&SyncCustomersRequest {
                file_url: "/files/orders.csv".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.updated, 2);
        assert_eq!(result.skipped, 1);
        assert!(result.errors.is_empty());
        assert_eq!(
            *gateway.since.lock().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 10)
        );

        let writes = gateway.writes.lock().unwrap();
        let names: Vec<&str> = writes.iter().map(|(_, n, _)| n.as_str()).collect();
        // только первый счёт, все накладные
        assert_eq!(names, vec!["SO-1", "SI-1", "DN-1", "DN-2", "SO-2"]);
        assert_eq!(writes[0].2.shipping_customer_name, "Mona");
        assert_eq!(writes[0].2.shipping_address, "Cairo");
        assert_eq!(writes[4].2.shipping_customer_name, "b@x.io");
    }

    #[tokio::test]
    async fn test_not_found_skips_and_failure_reports_row() {
        let dir = public_dir_with("orders.csv", EXPORT);
        let mut gateway = FakeGateway::default()
            .order("SO-1", "1001")
            .order("SO-2", "1002")
            .order("SO-3", "1003");
        gateway.missing.insert("SO-1".into());
        gateway.failing.insert("SO-3".into());
        let executor = SyncExecutor::new(Arc::new(gateway), dir.path().to_path_buf());

        let result = executor
            .sync(&SyncCustomersRequest {
                file_url: "orders.csv".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.updated, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(
            result.errors,
            vec![RowError {
                row: 4,
                error: "SO-3: Document is locked".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_file_url() {
        let executor = SyncExecutor::new(Arc::new(FakeGateway::default()), PathBuf::from("/nonexistent"));
        let err = executor
            .sync(&SyncCustomersRequest { file_url: "  ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::MissingFileUrl));
    }

    #[test]
    fn test_resolve_file_path() {
        let dir = public_dir_with("a.xlsx", "x");
        let base = dir.path();

        assert_eq!(
            resolve_file_path(base, "/files/a.xlsx").unwrap(),
            base.join("files").join("a.xlsx")
        );
        // fallback по имени файла
        assert_eq!(
            resolve_file_path(base, "/private/files/a.xlsx").unwrap(),
            base.join("files").join("a.xlsx")
        );
        assert!(matches!(
            resolve_file_path(base, "/files/b.xlsx"),
            Err(SyncError::FileNotFound(url)) if url == "/files/b.xlsx"
        ));
        assert!(resolve_file_path(base, "/files/../../etc/passwd").is_err());
    }
}
