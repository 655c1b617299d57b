//! Core type definitions for the slotted entity picker.
//!
//! This crate defines the plain data types shared by the directory clients
//! and the picker state machine:
//! - [`EntityId`]: the stable string identifier of a directory record
//! - [`Entity`]: a read-only copy of a directory record (id + JSON fields)
//! - [`SearchHit`]: one row of a directory search result
//! - [`TitleFormat`]: `{placeholder}` substitution for display titles

mod entity;
mod format;
mod ids;

pub use entity::{Entity, SearchHit};
pub use format::{DEFAULT_TITLE_TEMPLATE, TitleFormat};
pub use ids::EntityId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid entity id: {0:?}")]
    InvalidId(String),

    #[error("entity record is not a JSON object")]
    NotAnObject,
}
