use std::time::Duration;

use anyhow::Result;
use guildhall_application::{
    NotificationPager, NotificationPoller, RecentNotifications, Requirement,
};
use guildhall_core::notification::NotificationService;

use super::{print_json, require, user_error};
use crate::app::AppState;
use crate::views;

pub async fn recent(state: &AppState, json: bool) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    let items = state.notification_service.recent().await.map_err(user_error)?;
    if json {
        return print_json(&items);
    }
    println!(
        "{}",
        views::recent_notifications(&RecentNotifications { items, error: None })
    );
    Ok(())
}

pub async fn list(state: &AppState, limit: Option<u32>, pages: u32, json: bool) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    let limit = limit.unwrap_or(state.config.notifications.page_size);
    let mut pager = NotificationPager::new(state.notification_service.clone(), limit);

    for _ in 0..pages.max(1) {
        if !pager.has_more() {
            break;
        }
        pager.load_next().await.map_err(user_error)?;
    }

    if json {
        return print_json(pager.items());
    }
    if pager.items().is_empty() {
        println!("No notifications.");
    }
    for notification in pager.items() {
        println!("{}", views::notification_line(notification));
    }
    if pager.has_more() {
        println!("More available (next offset {}).", pager.skip());
    }
    Ok(())
}

/// Prints every poll result until Ctrl-C or the session ends.
pub async fn watch(state: &AppState, interval: Option<u64>) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    let period = Duration::from_secs(
        interval.unwrap_or(state.config.notifications.poll_interval_secs),
    );
    let poller = NotificationPoller::new(state.notification_service.clone(), period);
    let handle =
        poller.spawn_with_token(state.session_store.subscribe(), state.cancel.child_token());
    let mut updates = handle.subscribe();

    println!("Watching notifications every {}s (Ctrl-C to stop)", period.as_secs());
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    tracing::warn!("[Notifications] Failed to listen for Ctrl-C: {}", e);
                }
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    println!("Session ended.");
                    break;
                }
                let latest = updates.borrow_and_update().clone();
                println!("{}", views::recent_notifications(&latest));
            }
        }
    }

    handle.stop().await;
    Ok(())
}

pub async fn mark_read(state: &AppState, id: i64) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    state
        .notification_service
        .mark_read(id)
        .await
        .map_err(user_error)?;
    println!("Marked notification #{id} as read.");
    Ok(())
}
