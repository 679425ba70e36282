use anyhow::{Result, bail};
use guildhall_application::Requirement;
use guildhall_core::shop::{CategoryDraft, ItemDraft, OrderStatus, ShopService};

use super::{print_json, require, user_error};
use crate::app::AppState;
use crate::views;

pub async fn categories(state: &AppState, json: bool) -> Result<()> {
    let categories = state.shop_service.list_categories().await.map_err(user_error)?;
    if json {
        return print_json(&categories);
    }
    if categories.is_empty() {
        println!("The shop has no categories yet.");
    }
    for category in &categories {
        println!("{}", views::category_line(category));
    }
    Ok(())
}

pub async fn items(state: &AppState, category: Option<i64>, json: bool) -> Result<()> {
    let items = state
        .shop_service
        .list_items(category)
        .await
        .map_err(user_error)?;
    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("No items found.");
    }
    for item in &items {
        println!("{}", views::item_line(item));
    }
    Ok(())
}

pub async fn item(state: &AppState, id: i64, json: bool) -> Result<()> {
    let item = state.shop_service.get_item(id).await.map_err(user_error)?;
    if json {
        return print_json(&item);
    }
    println!("{}", views::item_line(&item));
    if let Some(description) = &item.description {
        println!("  {description}");
    }
    Ok(())
}

pub async fn buy(state: &AppState, id: i64, quantity: u32) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    if quantity == 0 {
        bail!("Quantity must be at least 1");
    }

    let item = state.shop_service.get_item(id).await.map_err(user_error)?;
    if !item.is_purchasable(quantity) {
        bail!("{} is not available in that quantity", item.name);
    }

    let order = state
        .shop_actions
        .purchase(id, quantity)
        .await
        .map_err(user_error)?;
    println!("{}", views::order_line(&order));
    println!(
        "{}",
        views::balance_widget(&state.session_store.state(), &state.balance.state())
    );
    Ok(())
}

pub async fn orders(state: &AppState, json: bool) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    let orders = state.shop_service.list_orders().await.map_err(user_error)?;
    if json {
        return print_json(&orders);
    }
    if orders.is_empty() {
        println!("No orders yet.");
    }
    for order in &orders {
        println!("{}", views::order_line(order));
    }
    Ok(())
}

pub async fn create_category(
    state: &AppState,
    name: String,
    description: Option<String>,
) -> Result<()> {
    require(state, Requirement::Admin)?;
    let category = state
        .shop_service
        .create_category(&CategoryDraft { name, description })
        .await
        .map_err(user_error)?;
    println!("Created {}", views::category_line(&category));
    Ok(())
}

pub async fn delete_category(state: &AppState, id: i64) -> Result<()> {
    require(state, Requirement::Admin)?;
    state
        .shop_service
        .delete_category(id)
        .await
        .map_err(user_error)?;
    println!("Deleted category #{id}");
    Ok(())
}

pub async fn create_item(state: &AppState, draft: ItemDraft) -> Result<()> {
    require(state, Requirement::Admin)?;
    let item = state
        .shop_service
        .create_item(&draft)
        .await
        .map_err(user_error)?;
    println!("Created {}", views::item_line(&item));
    Ok(())
}

pub async fn delete_item(state: &AppState, id: i64) -> Result<()> {
    require(state, Requirement::Admin)?;
    state.shop_service.delete_item(id).await.map_err(user_error)?;
    println!("Deleted item #{id}");
    Ok(())
}

pub async fn set_order_status(state: &AppState, id: i64, status: OrderStatus) -> Result<()> {
    require(state, Requirement::Admin)?;
    let order = state
        .shop_service
        .update_order_status(id, status)
        .await
        .map_err(user_error)?;
    println!("{}", views::order_line(&order));
    Ok(())
}
