//! CosmosLearn: inner solar system visualization and AI astronomy assistant
//!
//! This crate provides the two engines behind the CosmosLearn page: an orbit
//! renderer that places the inner planets on circular orbits around the Sun
//! once per animation tick, and a conversational bridge that forwards
//! beginner astronomy questions to a hosted text-completion service.

use thiserror::Error;

pub mod assistant;
pub mod backdrop;
pub mod catalog;
pub mod chat;
pub mod constants;
pub mod orbit;
pub mod render;
pub mod view;

// Re-export commonly used types
pub use assistant::{AssistantBridge, AssistantConfig};
pub use catalog::{Body, BodyCatalog, SOLAR_SYSTEM};
pub use chat::{ChatMessage, ChatSession, Role};
pub use orbit::{compute_position, Frame, HoverState, OrbitEvent, OrbitRenderer};
pub use view::ViewMode;

/// Main error type for the cosmoslearn library
#[derive(Debug, Error)]
pub enum CosmosError {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Invalid elapsed time: {0} s")]
    InvalidTime(f64),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Result type for cosmoslearn operations
pub type Result<T> = std::result::Result<T, CosmosError>;
