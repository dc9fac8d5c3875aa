pub mod request;
pub mod response;
pub mod workflow;

pub use request::{SyncCustomersRequest, UploadedFile};
pub use response::{ImportResult, RowError};
pub use workflow::{
    CustomerImportWorkflow, ImportDialogError, ImportDialogState, ACCEPTED_EXTENSIONS, FILE_FIELD,
};

use crate::usecases::common::UseCaseMetadata;

/// Полное имя серверного метода синхронизации
pub const SYNC_CUSTOMERS_METHOD: &str =
    "ecommerce_integrations.ecommerce_integrations.controllers.shopify_sync.sync_customers_from_excel";

/// Метод загрузки файла для поля Attach
pub const UPLOAD_FILE_METHOD: &str = "upload_file";

pub struct SyncCustomersFromExcel;

impl UseCaseMetadata for SyncCustomersFromExcel {
    fn usecase_index() -> &'static str {
        "u510"
    }

    fn usecase_name() -> &'static str {
        "sync_customers_from_excel"
    }

    fn display_name() -> &'static str {
        "Import Shopify Customers"
    }

    fn description() -> &'static str {
        "Fill shipping name, address and phone on Sales Orders, Sales Invoices \
         and Delivery Notes from a Shopify orders export (.xlsx or .csv)."
    }

    fn rpc_method() -> &'static str {
        SYNC_CUSTOMERS_METHOD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(SyncCustomersFromExcel::full_name(), "u510_sync_customers_from_excel");
        assert_eq!(
            SyncCustomersFromExcel::method_url(),
            format!("/api/method/{}", SYNC_CUSTOMERS_METHOD)
        );
    }
}
