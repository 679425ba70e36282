//! Progression (level/XP) domain module.

mod model;
mod service;

pub use model::ProgressionSnapshot;
pub use service::ProgressionService;
