/// Storage layer for persisting journal data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving entries, per-user stats and
/// notification profiles.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{EntryId, JournalEntry, Mood, UserId, UserProfile, UserStats};

/// Default page size for entry listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size a caller may ask for
pub const MAX_PAGE_SIZE: u32 = 50;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Journal entry not found: {entry_id}")]
    EntryNotFound { entry_id: String },

    #[error("Corrupt row data: {0}")]
    InvalidData(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Filter and page selection for entry listings
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFilter {
    pub user_id: UserId,
    pub mood: Option<Mood>,
    /// Inclusive lower bound on the entry date
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the entry date
    pub end: Option<DateTime<Utc>>,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl EntryFilter {
    /// First page of everything a user wrote
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            mood: None,
            start: None,
            end: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Rows to skip before the requested page
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of entries plus the total matching the filter
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPage {
    pub entries: Vec<JournalEntry>,
    pub total: u32,
}

/// Trait defining the storage interface for the journal
///
/// Every entry lookup is scoped to a user, so one user's ID can never reach
/// another user's entries.
pub trait JournalStorage {
    /// Persist a new entry
    fn create_entry(&self, entry: &JournalEntry) -> Result<(), StorageError>;

    /// Get one of a user's entries by ID
    fn get_entry(&self, user_id: &UserId, entry_id: &EntryId) -> Result<JournalEntry, StorageError>;

    /// Overwrite an existing entry
    fn update_entry(&self, entry: &JournalEntry) -> Result<(), StorageError>;

    /// Remove one of a user's entries
    fn delete_entry(&self, user_id: &UserId, entry_id: &EntryId) -> Result<(), StorageError>;

    /// Filtered, paginated listing, newest first
    fn list_entries(&self, filter: &EntryFilter) -> Result<EntryPage, StorageError>;

    /// All of a user's entries dated within `[start, end]`
    fn find_entries_by_user_and_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, StorageError>;

    /// Every entry a user has, newest first
    fn find_all_entries_by_user(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, StorageError>;

    /// Dates of every entry a user has (unordered)
    fn find_all_entry_dates_by_user(&self, user_id: &UserId) -> Result<Vec<DateTime<Utc>>, StorageError>;

    /// Stored stats, or empty stats for a user that has none yet
    fn get_user_stats(&self, user_id: &UserId) -> Result<UserStats, StorageError>;

    /// Store stats; `now` stamps the row if the user has no profile yet
    fn update_user_stats(&self, stats: &UserStats, now: DateTime<Utc>) -> Result<(), StorageError>;

    /// Recompute stats from every entry date and store them as one atomic step
    fn recompute_user_stats(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<UserStats, StorageError>;

    fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError>;

    /// Create or replace a user's notification preferences
    fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    fn list_profiles(&self) -> Result<Vec<UserProfile>, StorageError>;
}

/// Recompute a user's stats from their whole entry history and store them
pub fn refresh_user_stats<S: JournalStorage + ?Sized>(
    storage: &S,
    user_id: &UserId,
    now: DateTime<Utc>,
) -> Result<UserStats, StorageError> {
    let stats = storage.recompute_user_stats(user_id, now)?;

    tracing::debug!(
        "Refreshed stats for {}: {} entries, streak {} (best {})",
        user_id,
        stats.total_entries,
        stats.current_streak,
        stats.longest_streak
    );
    Ok(stats)
}
