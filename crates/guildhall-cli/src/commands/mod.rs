pub mod files;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod session;
pub mod shop;
pub mod xp;

use anyhow::{Result, anyhow};
use guildhall_application::{AccessGuard, Requirement};
use guildhall_core::error::HubError;
use serde::Serialize;

use crate::app::AppState;
use crate::views;

/// Fails with the matching notice unless the session satisfies `requirement`.
pub fn require(state: &AppState, requirement: Requirement) -> Result<()> {
    let decision = AccessGuard::evaluate(&state.session_store.state(), requirement);
    match views::access_notice(decision) {
        None => Ok(()),
        Some(notice) => Err(anyhow!(notice)),
    }
}

/// Converts a service error into the message shown to the user.
pub fn user_error(error: HubError) -> anyhow::Error {
    if error.is_unauthenticated() {
        tracing::debug!("[Commands] Request rejected as unauthenticated");
    } else {
        tracing::debug!("[Commands] Request failed: {:?}", error);
    }
    anyhow!(views::error_message(&error))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
