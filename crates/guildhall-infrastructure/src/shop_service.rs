//! HTTP implementation of `ShopService`.

use async_trait::async_trait;
use guildhall_core::error::Result;
use guildhall_core::shop::{
    CategoryDraft, ItemDraft, OrderStatus, ShopCategory, ShopItem, ShopOrder, ShopService,
};
use reqwest::Method;
use serde::Serialize;

use crate::http::ApiClient;
use crate::http::error::not_found_as;

pub const CATEGORIES_PATH: &str = "/api/v1/shop/categories";
pub const ITEMS_PATH: &str = "/api/v1/shop/items";
pub const ORDERS_PATH: &str = "/api/v1/shop/orders";

#[derive(Debug, Serialize)]
struct PurchaseRequest {
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct OrderStatusUpdate {
    status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct HttpShopService {
    api: ApiClient,
}

impl HttpShopService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn shop_url(&self, resource: &str, id: i64, action: Option<&str>) -> Result<reqwest::Url> {
        let id = id.to_string();
        let mut segments = vec!["api", "v1", "shop", resource, id.as_str()];
        segments.extend(action);
        self.api.url_with_segments(&segments)
    }
}

#[async_trait]
impl ShopService for HttpShopService {
    async fn list_categories(&self) -> Result<Vec<ShopCategory>> {
        self.api.send_json(self.api.get(CATEGORIES_PATH)).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<ShopCategory> {
        self.api
            .send_json(self.api.post(CATEGORIES_PATH).json(draft))
            .await
    }

    async fn update_category(
        &self,
        category_id: i64,
        draft: &CategoryDraft,
    ) -> Result<ShopCategory> {
        let url = self.shop_url("categories", category_id, None)?;
        self.api
            .send_json(self.api.request_url(Method::PUT, url).json(draft))
            .await
            .map_err(|e| not_found_as(e, "Shop category", &category_id.to_string()))
    }

    async fn delete_category(&self, category_id: i64) -> Result<()> {
        let url = self.shop_url("categories", category_id, None)?;
        self.api
            .send_empty(self.api.request_url(Method::DELETE, url))
            .await
            .map_err(|e| not_found_as(e, "Shop category", &category_id.to_string()))
    }

    async fn list_items(&self, category_id: Option<i64>) -> Result<Vec<ShopItem>> {
        let mut request = self.api.get(ITEMS_PATH);
        if let Some(category_id) = category_id {
            request = request.query(&[("category_id", category_id)]);
        }
        self.api.send_json(request).await
    }

    async fn get_item(&self, item_id: i64) -> Result<ShopItem> {
        let url = self.shop_url("items", item_id, None)?;
        self.api
            .send_json(self.api.request_url(Method::GET, url))
            .await
            .map_err(|e| not_found_as(e, "Shop item", &item_id.to_string()))
    }

    async fn create_item(&self, draft: &ItemDraft) -> Result<ShopItem> {
        self.api.send_json(self.api.post(ITEMS_PATH).json(draft)).await
    }

    async fn update_item(&self, item_id: i64, draft: &ItemDraft) -> Result<ShopItem> {
        let url = self.shop_url("items", item_id, None)?;
        self.api
            .send_json(self.api.request_url(Method::PUT, url).json(draft))
            .await
            .map_err(|e| not_found_as(e, "Shop item", &item_id.to_string()))
    }

    async fn delete_item(&self, item_id: i64) -> Result<()> {
        let url = self.shop_url("items", item_id, None)?;
        self.api
            .send_empty(self.api.request_url(Method::DELETE, url))
            .await
            .map_err(|e| not_found_as(e, "Shop item", &item_id.to_string()))
    }

    async fn purchase(&self, item_id: i64, quantity: u32) -> Result<ShopOrder> {
        let url = self.shop_url("items", item_id, Some("purchase"))?;
        tracing::info!("[Shop] Purchasing item {} x{}", item_id, quantity);
        self.api
            .send_json(
                self.api
                    .request_url(Method::POST, url)
                    .json(&PurchaseRequest { quantity }),
            )
            .await
            .map_err(|e| not_found_as(e, "Shop item", &item_id.to_string()))
    }

    async fn list_orders(&self) -> Result<Vec<ShopOrder>> {
        self.api.send_json(self.api.get(ORDERS_PATH)).await
    }

    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<ShopOrder> {
        let url = self.shop_url("orders", order_id, None)?;
        self.api
            .send_json(
                self.api
                    .request_url(Method::PATCH, url)
                    .json(&OrderStatusUpdate { status }),
            )
            .await
            .map_err(|e| not_found_as(e, "Shop order", &order_id.to_string()))
    }
}
