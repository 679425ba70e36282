//! HTTP plumbing shared by the service wrappers.

pub mod client;
pub mod error;

pub use client::ApiClient;
