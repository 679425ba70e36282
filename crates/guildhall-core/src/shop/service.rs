//! Shop service trait.

use async_trait::async_trait;

use super::model::{CategoryDraft, ItemDraft, OrderStatus, ShopCategory, ShopItem, ShopOrder};
use crate::error::Result;

/// Catalog browsing, purchasing, and admin CRUD for the shop.
#[async_trait]
pub trait ShopService: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<ShopCategory>>;

    async fn create_category(&self, draft: &CategoryDraft) -> Result<ShopCategory>;

    async fn update_category(&self, category_id: i64, draft: &CategoryDraft)
    -> Result<ShopCategory>;

    async fn delete_category(&self, category_id: i64) -> Result<()>;

    /// Lists items, optionally restricted to one category.
    async fn list_items(&self, category_id: Option<i64>) -> Result<Vec<ShopItem>>;

    async fn get_item(&self, item_id: i64) -> Result<ShopItem>;

    async fn create_item(&self, draft: &ItemDraft) -> Result<ShopItem>;

    async fn update_item(&self, item_id: i64, draft: &ItemDraft) -> Result<ShopItem>;

    async fn delete_item(&self, item_id: i64) -> Result<()>;

    /// Spends currency on an item. Callers refresh the balance afterwards.
    async fn purchase(&self, item_id: i64, quantity: u32) -> Result<ShopOrder>;

    /// Orders placed by the current user.
    async fn list_orders(&self) -> Result<Vec<ShopOrder>>;

    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<ShopOrder>;
}
