//! Background preference resolution.
//!
//! The active background is the UI override when one was chosen during this
//! UI session, otherwise the background stored on the session, otherwise none
//! (theme default).

use crate::session::Session;

/// UI-session-scoped override. Lost on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackgroundOverride {
    /// No override chosen; defer to the session.
    #[default]
    Unset,
    /// Explicit choice. `Set(None)` forces the theme default.
    Set(Option<String>),
}

impl BackgroundOverride {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }
}

/// Resolves the background to display.
pub fn resolve_background(
    override_choice: &BackgroundOverride,
    session: Option<&Session>,
) -> Option<String> {
    match override_choice {
        BackgroundOverride::Set(choice) => choice.clone(),
        BackgroundOverride::Unset => session.and_then(|s| s.background_url.clone()),
    }
}
