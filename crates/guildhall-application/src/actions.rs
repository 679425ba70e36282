//! Mutations that invalidate provider state.

use std::sync::Arc;

use guildhall_core::error::Result;
use guildhall_core::files::{FileItem, FileService, FileUpload};
use guildhall_core::shop::{ShopOrder, ShopService};

use crate::provider::{BalanceProvider, ProgressionProvider};

pub struct ShopActions {
    shop: Arc<dyn ShopService>,
    balance: Arc<BalanceProvider>,
}

impl ShopActions {
    pub fn new(shop: Arc<dyn ShopService>, balance: Arc<BalanceProvider>) -> Self {
        Self { shop, balance }
    }

    /// Buys an item and refreshes the balance it was paid from.
    pub async fn purchase(&self, item_id: i64, quantity: u32) -> Result<ShopOrder> {
        let order = self.shop.purchase(item_id, quantity).await?;
        tracing::info!(
            "[ShopActions] Purchased item {} x{} (order {})",
            item_id,
            quantity,
            order.id
        );
        self.balance.refresh().await;
        Ok(order)
    }
}

/// Uploads and deletions can award or revoke XP server-side.
pub struct FileActions {
    files: Arc<dyn FileService>,
    progression: Arc<ProgressionProvider>,
}

impl FileActions {
    pub fn new(files: Arc<dyn FileService>, progression: Arc<ProgressionProvider>) -> Self {
        Self { files, progression }
    }

    pub async fn upload(&self, file: FileUpload) -> Result<FileItem> {
        let item = self.files.upload(file).await?;
        tracing::info!("[FileActions] Uploaded {}", item.filename);
        self.progression.refresh().await;
        Ok(item)
    }

    pub async fn delete(&self, filename: &str) -> Result<()> {
        self.files.delete(filename).await?;
        tracing::info!("[FileActions] Deleted {}", filename);
        self.progression.refresh().await;
        Ok(())
    }
}
