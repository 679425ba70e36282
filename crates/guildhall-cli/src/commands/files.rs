use std::path::Path;

use anyhow::{Context, Result, anyhow};
use guildhall_application::Requirement;
use guildhall_core::files::{FileService, FileUpload};

use super::{print_json, require, user_error};
use crate::app::AppState;
use crate::views;

pub async fn list(state: &AppState, json: bool) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    let files = state.file_service.list().await.map_err(user_error)?;
    if json {
        return print_json(&files);
    }
    if files.is_empty() {
        println!("No files uploaded yet.");
    }
    for file in &files {
        println!("{}", views::file_line(file));
    }
    Ok(())
}

pub async fn upload(state: &AppState, path: &Path) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let upload = FileUpload {
        content_type: content_type_for(&filename),
        filename,
        bytes,
    };
    let item = state.file_actions.upload(upload).await.map_err(user_error)?;

    println!("Uploaded {}", views::file_line(&item));
    println!(
        "{}",
        views::progression_widget(&state.session_store.state(), &state.progression.state())
    );
    Ok(())
}

pub async fn delete(state: &AppState, filename: &str) -> Result<()> {
    require(state, Requirement::Authenticated)?;
    state
        .file_actions
        .delete(filename)
        .await
        .map_err(user_error)?;
    println!("Deleted {filename}");
    Ok(())
}

fn content_type_for(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first()
        .map(|mime| mime.essence_str().to_string())
}
