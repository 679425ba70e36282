//! Route guards.
//!
//! A denied check is a navigation outcome, never an error.

use guildhall_core::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session not resolved yet; render a neutral placeholder.
    Loading,
    Allow,
    Redirect(Route),
}

pub struct AccessGuard;

impl AccessGuard {
    pub fn evaluate(state: &SessionState, requirement: Requirement) -> AccessDecision {
        if state.is_loading {
            return AccessDecision::Loading;
        }
        let Some(user) = state.user.as_ref() else {
            return AccessDecision::Redirect(Route::Login);
        };
        let allowed = match requirement {
            Requirement::Authenticated => true,
            Requirement::Admin => user.has_admin_rights(),
            Requirement::SuperAdmin => user.is_super_admin,
        };
        if allowed {
            AccessDecision::Allow
        } else {
            AccessDecision::Redirect(Route::Home)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Loading,
    ShowApp,
    ShowNotice,
}

/// Hides the whole application during maintenance. Super admins pass.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceGate {
    enabled: bool,
}

impl MaintenanceGate {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn evaluate(&self, state: &SessionState) -> GateDecision {
        if !self.enabled {
            return GateDecision::ShowApp;
        }
        if state.is_loading {
            return GateDecision::Loading;
        }
        match state.user.as_ref() {
            Some(user) if user.is_super_admin => GateDecision::ShowApp,
            _ => GateDecision::ShowNotice,
        }
    }
}
