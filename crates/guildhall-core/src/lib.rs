//! Domain layer for the Guildhall community hub client.
//!
//! Holds the remote-sourced models, the shared error type, the configuration
//! model, and the service traits that the infrastructure layer implements.

pub mod background;
pub mod balance;
pub mod config;
pub mod error;
pub mod files;
pub mod health;
pub mod notification;
pub mod profile;
pub mod progression;
pub mod session;
pub mod shop;

// Re-export common error type
pub use error::{ErrorCategory, HubError, Result};
