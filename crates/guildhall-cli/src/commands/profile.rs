use anyhow::Result;
use guildhall_core::profile::ProfileService;

use super::{print_json, user_error};
use crate::app::AppState;
use crate::views;

pub async fn show(state: &AppState, identifier: &str, json: bool) -> Result<()> {
    let profile = state
        .profile_service
        .get_profile(identifier)
        .await
        .map_err(user_error)?;
    if json {
        return print_json(&profile);
    }
    println!("{}", views::profile_card(&profile));
    Ok(())
}
