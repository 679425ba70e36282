//! Shop domain module.
//!
//! - `model`: categories, items, orders and their draft payloads
//! - `service`: `ShopService` trait

mod model;
mod service;

pub use model::{CategoryDraft, ItemDraft, OrderStatus, ShopCategory, ShopItem, ShopOrder};
pub use service::ShopService;
