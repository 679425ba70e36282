use anyhow::Result;
use serde_json::json;

use super::print_json;
use crate::app::AppState;
use crate::views;

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let session = state.session_store.state();
    let progression = state.progression.state();
    let balance = state.balance.state();
    let background = state.background.active_background();

    if json {
        return print_json(&json!({
            "user": session.user,
            "progression": progression.snapshot,
            "balance": balance.snapshot.map(|b| b.balance),
            "background": background,
        }));
    }

    println!("{}", views::session_line(&session));
    println!("{}", views::progression_widget(&session, &progression));
    println!("{}", views::balance_widget(&session, &balance));
    if session.is_authenticated() {
        println!("{}", views::background_line(background.as_deref()));
    }
    Ok(())
}

pub async fn logout(state: &AppState) -> Result<()> {
    if !state.session_store.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    state.session_store.logout().await;
    println!("Logged out.");
    Ok(())
}
