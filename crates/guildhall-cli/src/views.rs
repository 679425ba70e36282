//! Text rendering of provider state.
//!
//! Views only read snapshots; they never fetch. Every widget has a loading
//! rendering, a logged-out rendering and an error rendering.

use guildhall_application::{AccessDecision, GateDecision, ProviderState, RecentNotifications, Route};
use guildhall_core::balance::BalanceSnapshot;
use guildhall_core::error::{ErrorCategory, HubError};
use guildhall_core::files::FileItem;
use guildhall_core::notification::Notification;
use guildhall_core::profile::PublicProfile;
use guildhall_core::progression::ProgressionSnapshot;
use guildhall_core::session::SessionState;
use guildhall_core::shop::{ShopCategory, ShopItem, ShopOrder};

const BAR_WIDTH: usize = 20;

pub fn session_line(session: &SessionState) -> String {
    if session.is_loading {
        return "Checking session...".to_string();
    }
    match session.user.as_ref() {
        Some(user) => {
            let role = if user.is_super_admin {
                " (super admin)"
            } else if user.is_admin {
                " (admin)"
            } else {
                ""
            };
            format!("Logged in as {}{}", user.username, role)
        }
        None => "Not logged in. Please log in to continue.".to_string(),
    }
}

pub fn progression_widget(
    session: &SessionState,
    state: &ProviderState<ProgressionSnapshot>,
) -> String {
    if session.is_loading || (state.is_loading && state.snapshot.is_none()) {
        return "Level: loading...".to_string();
    }
    if !session.is_authenticated() {
        return "Level: please log in to track your progress".to_string();
    }
    match (&state.snapshot, &state.error) {
        (Some(snapshot), error) => {
            let mut line = format!(
                "Level {} | {} XP {} {:.0}% ({} XP to next level)",
                snapshot.level,
                snapshot.total_xp,
                progress_bar(snapshot.progress_percent),
                snapshot.progress_percent,
                snapshot.xp_needed
            );
            if let Some(error) = error {
                line.push_str(&format!(" [stale: {error}]"));
            }
            line
        }
        (None, Some(error)) => format!("Level: unavailable ({error})"),
        (None, None) => "Level: no data".to_string(),
    }
}

pub fn balance_widget(session: &SessionState, state: &ProviderState<BalanceSnapshot>) -> String {
    if session.is_loading || (state.is_loading && state.snapshot.is_none()) {
        return "Balance: loading...".to_string();
    }
    if !session.is_authenticated() {
        return "Balance: please log in to see your coins".to_string();
    }
    match (&state.snapshot, &state.error) {
        (Some(snapshot), None) => format!("Balance: {} coins", snapshot.balance),
        (Some(snapshot), Some(error)) => {
            format!("Balance: {} coins [stale: {error}]", snapshot.balance)
        }
        (None, Some(error)) => format!("Balance: unavailable ({error})"),
        (None, None) => "Balance: -".to_string(),
    }
}

pub fn background_line(background: Option<&str>) -> String {
    match background {
        Some(url) => format!("Background: {url}"),
        None => "Background: theme default".to_string(),
    }
}

/// Fixed-width bar, clamped to `0..=100` percent.
pub fn progress_bar(percent: f64) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn notification_line(notification: &Notification) -> String {
    let marker = if notification.is_read { " " } else { "*" };
    let mut line = format!(
        "{marker} #{} {} ({})",
        notification.id,
        notification.title,
        notification.created_at.format("%Y-%m-%d %H:%M")
    );
    if !notification.message.is_empty() {
        line.push_str(&format!("\n    {}", notification.message));
    }
    line
}

pub fn recent_notifications(recent: &RecentNotifications) -> String {
    let mut out = format!("Notifications ({} unread)", recent.unread_count());
    if recent.items.is_empty() {
        out.push_str("\n  Nothing new.");
    }
    for notification in &recent.items {
        out.push('\n');
        out.push_str(&notification_line(notification));
    }
    if let Some(error) = &recent.error {
        out.push_str(&format!("\n  (last update failed: {error})"));
    }
    out
}

pub fn file_line(file: &FileItem) -> String {
    format!("{}  {}  {}", file.filename, human_size(file.size), file.url)
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn category_line(category: &ShopCategory) -> String {
    match &category.description {
        Some(description) => format!("#{} {} - {}", category.id, category.name, description),
        None => format!("#{} {}", category.id, category.name),
    }
}

pub fn item_line(item: &ShopItem) -> String {
    let stock = match item.stock {
        Some(0) => " (sold out)".to_string(),
        Some(stock) => format!(" ({stock} left)"),
        None => String::new(),
    };
    let inactive = if item.is_active { "" } else { " [inactive]" };
    format!("#{} {} - {} coins{stock}{inactive}", item.id, item.name, item.price)
}

pub fn order_line(order: &ShopOrder) -> String {
    let name = order
        .item_name
        .clone()
        .unwrap_or_else(|| format!("item #{}", order.item_id));
    format!(
        "Order #{}: {} x{} for {} coins [{}]",
        order.id, name, order.quantity, order.total_price, order.status
    )
}

pub fn profile_card(profile: &PublicProfile) -> String {
    let mut out = format!(
        "{}\n  Level {} ({} XP)",
        profile.username, profile.level, profile.total_xp
    );
    if let Some(joined) = profile.joined_at {
        out.push_str(&format!("\n  Member since {}", joined.format("%Y-%m-%d")));
    }
    if profile.badges.is_empty() {
        out.push_str("\n  No badges yet");
    } else {
        let names: Vec<&str> = profile.badges.iter().map(|b| b.name.as_str()).collect();
        out.push_str(&format!("\n  Badges: {}", names.join(", ")));
    }
    out
}

/// User-facing message for a failed action.
pub fn error_message(error: &HubError) -> String {
    match error.category() {
        ErrorCategory::AuthenticationAbsent => "Please log in to continue.".to_string(),
        ErrorCategory::AuthorizationDenied => {
            format!("You don't have permission to do that: {error}")
        }
        ErrorCategory::NotFound | ErrorCategory::FeatureUnavailable => error.to_string(),
        ErrorCategory::Transient => format!("The hub is unreachable right now ({error}). Try again."),
        ErrorCategory::Server => format!("Request failed: {error}"),
    }
}

/// `None` when the command may proceed.
pub fn access_notice(decision: AccessDecision) -> Option<&'static str> {
    match decision {
        AccessDecision::Allow => None,
        AccessDecision::Loading => Some("Still checking your session..."),
        AccessDecision::Redirect(Route::Login) => Some("Please log in to continue."),
        AccessDecision::Redirect(Route::Home) => {
            Some("This section is restricted to administrators.")
        }
    }
}

pub fn maintenance_notice(decision: GateDecision) -> Option<&'static str> {
    match decision {
        GateDecision::ShowApp => None,
        GateDecision::Loading => Some("Checking maintenance status..."),
        GateDecision::ShowNotice => {
            Some("The hub is under maintenance. Please check back later.")
        }
    }
}
