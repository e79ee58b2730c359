/// Domain module containing core business logic and data types
///
/// This module defines the core entities (JournalEntry, UserStats, UserProfile)
/// and their validation rules, plus the streak calculator that keeps the
/// stats honest.

pub mod entry;
pub mod profile;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use entry::*;
pub use profile::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid journal text: {0}")]
    InvalidText(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
