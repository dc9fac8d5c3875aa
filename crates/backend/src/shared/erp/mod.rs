//! HTTP-клиент ERP: серверные методы и REST-ресурсы документов.

mod client;

pub use client::{ErpClient, ErpError};

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::shared::config::ErpConfig;

static ERP_CLIENT: OnceCell<Arc<ErpClient>> = OnceCell::new();

/// Создать общий клиент при старте сервера
pub fn initialize(config: &ErpConfig) -> anyhow::Result<()> {
    let client = ErpClient::new(config)?;
    tracing::info!("ERP client ready for {}", client.base_url());
    let _ = ERP_CLIENT.set(Arc::new(client));
    Ok(())
}

pub fn client() -> Result<Arc<ErpClient>, ErpError> {
    ERP_CLIENT.get().cloned().ok_or(ErpError::NotInitialized)
}
