//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the authenticated identity (`Session`) and its broadcast form (`SessionState`)
//! - `service`: remote authentication trait (`AuthService`)

mod model;
mod service;

pub use model::{Session, SessionState};
pub use service::AuthService;
