use anyhow::Result;
use guildhall_application::Requirement;

use super::{require, user_error};
use crate::app::AppState;
use crate::views;

pub async fn award(state: &AppState, amount: i64) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    state.progression.add_xp(amount).await.map_err(user_error)?;
    println!("Awarded {amount} XP.");
    print_progression(state);
    Ok(())
}

pub async fn reset(state: &AppState) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    state.progression.reset_level().await.map_err(user_error)?;
    println!("Progression reset.");
    print_progression(state);
    Ok(())
}

fn print_progression(state: &AppState) {
    println!(
        "{}",
        views::progression_widget(&state.session_store.state(), &state.progression.state())
    );
}
