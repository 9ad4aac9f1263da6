//! MindEase wellness engine: mood journal, stress self-assessment and a
//! rotating daily mindfulness task, persisted per signed-in identity.

pub mod auth;
pub mod config;
pub mod dto;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;

pub use auth::identity::{IdentityHolder, UserId};
pub use config::Config;
pub use engine::WellnessEngine;
pub use error::{AppError, AppResult};
pub use services::clock::{Clock, ManualClock, SystemClock};
pub use store::{FileStore, MemoryStore, Store, StoreError};
