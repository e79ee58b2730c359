/// SQLite implementation of the journal storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving journal data. It handles all SQL queries and data conversion.

use std::path::PathBuf;

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;

use crate::clock::local_day;
use crate::domain::{EntryId, JournalEntry, Mood, Sentiment, UserId, UserProfile, UserStats};
use crate::storage::{migrations, EntryFilter, EntryPage, JournalStorage, StorageError};

const ENTRY_COLUMNS: &str = "id, user_id, date, text, word_count, mood, confidence, sentiment, \
     sentiment_score, emotions, keywords, suggestions, summary, created_at, updated_at";

const PROFILE_COLUMNS: &str = "user_id, name, email, notifications, daily_reminder, created_at";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the JournalStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Throwaway database, mostly for tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Several connections (server and scheduler) may share one file
        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(|e| StorageError::Connection(format!("Failed to set busy timeout: {}", e)))?;

        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn query_entries(
        &self,
        sql: &str,
        args: &[String],
    ) -> Result<Vec<JournalEntry>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), row_to_entry)?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

/// Fixed-width UTC timestamp so text comparison matches time order
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn invalid_column(idx: usize, what: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(idx, what.to_string(), Type::Text)
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid_column(idx, "Invalid datetime"))
}

fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|_| invalid_column(idx, "Invalid JSON"))
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let id_str: String = row.get(0)?;
    let id = EntryId::from_string(&id_str).map_err(|_| invalid_column(0, "Invalid UUID"))?;

    let mood_str: String = row.get(5)?;
    let mood = Mood::parse(&mood_str).ok_or_else(|| invalid_column(5, "Invalid mood"))?;

    let sentiment_str: String = row.get(7)?;
    let sentiment =
        Sentiment::parse(&sentiment_str).ok_or_else(|| invalid_column(7, "Invalid sentiment"))?;

    Ok(JournalEntry {
        id,
        user_id: UserId::new(row.get::<_, String>(1)?),
        date: timestamp_column(row, 2)?,
        text: row.get(3)?,
        word_count: row.get(4)?,
        mood,
        confidence: row.get(6)?,
        sentiment,
        sentiment_score: row.get(8)?,
        emotions: json_column(row, 9)?,
        keywords: json_column(row, 10)?,
        suggestions: json_column(row, 11)?,
        summary: row.get(12)?,
        created_at: timestamp_column(row, 13)?,
        updated_at: timestamp_column(row, 14)?,
    })
}

fn row_to_profile(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    let reminder: Option<String> = row.get(4)?;
    let daily_reminder = match reminder {
        Some(s) => Some(
            NaiveTime::parse_from_str(&s, "%H:%M")
                .map_err(|_| invalid_column(4, "Invalid reminder time"))?,
        ),
        None => None,
    };

    Ok(UserProfile {
        user_id: UserId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        notifications: row.get(3)?,
        daily_reminder,
        created_at: timestamp_column(row, 5)?,
    })
}

impl JournalStorage for SqliteStorage {
    fn create_entry(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        self.conn.execute(
            &format!(
                "INSERT INTO journal_entries ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                ENTRY_COLUMNS
            ),
            params![
                entry.id.to_string(),
                entry.user_id.as_str(),
                format_timestamp(&entry.date),
                entry.text,
                entry.word_count,
                entry.mood.as_str(),
                entry.confidence,
                entry.sentiment.as_str(),
                entry.sentiment_score,
                serde_json::to_string(&entry.emotions)?,
                serde_json::to_string(&entry.keywords)?,
                serde_json::to_string(&entry.suggestions)?,
                entry.summary,
                format_timestamp(&entry.created_at),
                format_timestamp(&entry.updated_at),
            ],
        )?;

        tracing::debug!("Created journal entry: {} for user {}", entry.id, entry.user_id);
        Ok(())
    }

    fn get_entry(&self, user_id: &UserId, entry_id: &EntryId) -> Result<JournalEntry, StorageError> {
        let result = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM journal_entries WHERE id = ?1 AND user_id = ?2",
                    ENTRY_COLUMNS
                ),
                params![entry_id.to_string(), user_id.as_str()],
                row_to_entry,
            )
            .optional()?;

        result.ok_or_else(|| StorageError::EntryNotFound {
            entry_id: entry_id.to_string(),
        })
    }

    fn update_entry(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE journal_entries SET
                date = ?3,
                text = ?4,
                word_count = ?5,
                mood = ?6,
                confidence = ?7,
                sentiment = ?8,
                sentiment_score = ?9,
                emotions = ?10,
                keywords = ?11,
                suggestions = ?12,
                summary = ?13,
                updated_at = ?14
             WHERE id = ?1 AND user_id = ?2",
            params![
                entry.id.to_string(),
                entry.user_id.as_str(),
                format_timestamp(&entry.date),
                entry.text,
                entry.word_count,
                entry.mood.as_str(),
                entry.confidence,
                entry.sentiment.as_str(),
                entry.sentiment_score,
                serde_json::to_string(&entry.emotions)?,
                serde_json::to_string(&entry.keywords)?,
                serde_json::to_string(&entry.suggestions)?,
                entry.summary,
                format_timestamp(&entry.updated_at),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::EntryNotFound {
                entry_id: entry.id.to_string(),
            });
        }

        tracing::debug!("Updated journal entry: {}", entry.id);
        Ok(())
    }

    fn delete_entry(&self, user_id: &UserId, entry_id: &EntryId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
            params![entry_id.to_string(), user_id.as_str()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::EntryNotFound {
                entry_id: entry_id.to_string(),
            });
        }

        tracing::debug!("Deleted journal entry: {}", entry_id);
        Ok(())
    }

    fn list_entries(&self, filter: &EntryFilter) -> Result<EntryPage, StorageError> {
        let mut clauses = vec!["user_id = ?".to_string()];
        let mut args = vec![filter.user_id.as_str().to_string()];

        if let Some(mood) = filter.mood {
            clauses.push("mood = ?".to_string());
            args.push(mood.as_str().to_string());
        }
        if let Some(start) = filter.start {
            clauses.push("date >= ?".to_string());
            args.push(format_timestamp(&start));
        }
        if let Some(end) = filter.end {
            clauses.push("date <= ?".to_string());
            args.push(format_timestamp(&end));
        }
        let where_clause = clauses.join(" AND ");

        let total: u32 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM journal_entries WHERE {}", where_clause),
            params_from_iter(args.iter()),
            |row| row.get(0),
        )?;

        let sql = format!(
            "SELECT {} FROM journal_entries WHERE {} ORDER BY date DESC, created_at DESC LIMIT {} OFFSET {}",
            ENTRY_COLUMNS,
            where_clause,
            filter.limit,
            filter.offset()
        );
        let entries = self.query_entries(&sql, &args)?;

        Ok(EntryPage { entries, total })
    }

    fn find_entries_by_user_and_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, StorageError> {
        let sql = format!(
            "SELECT {} FROM journal_entries WHERE user_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date DESC",
            ENTRY_COLUMNS
        );
        self.query_entries(
            &sql,
            &[
                user_id.as_str().to_string(),
                format_timestamp(&start),
                format_timestamp(&end),
            ],
        )
    }

    fn find_all_entries_by_user(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, StorageError> {
        let sql = format!(
            "SELECT {} FROM journal_entries WHERE user_id = ?1 ORDER BY date DESC",
            ENTRY_COLUMNS
        );
        self.query_entries(&sql, &[user_id.as_str().to_string()])
    }

    fn find_all_entry_dates_by_user(&self, user_id: &UserId) -> Result<Vec<DateTime<Utc>>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT date FROM journal_entries WHERE user_id = ?1")?;
        let rows = stmt.query_map(params![user_id.as_str()], |row| timestamp_column(row, 0))?;

        let mut dates = Vec::new();
        for date in rows {
            dates.push(date?);
        }
        Ok(dates)
    }

    fn get_user_stats(&self, user_id: &UserId) -> Result<UserStats, StorageError> {
        let result = self
            .conn
            .query_row(
                "SELECT total_entries, current_streak, longest_streak, last_entry_date
                 FROM user_profiles WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| {
                    let last_entry_date = match row.get::<_, Option<String>>(3)? {
                        Some(_) => Some(timestamp_column(row, 3)?),
                        None => None,
                    };
                    Ok(UserStats {
                        user_id: user_id.clone(),
                        total_entries: row.get(0)?,
                        current_streak: row.get(1)?,
                        longest_streak: row.get(2)?,
                        last_entry_date,
                    })
                },
            )
            .optional()?;

        Ok(result.unwrap_or_else(|| UserStats::new(user_id.clone())))
    }

    fn update_user_stats(&self, stats: &UserStats, now: DateTime<Utc>) -> Result<(), StorageError> {
        // A stats row may precede the profile; the user ID doubles as the name
        self.conn.execute(
            "INSERT INTO user_profiles (
                user_id, name, created_at, total_entries, current_streak, longest_streak, last_entry_date
            ) VALUES (?1, ?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(user_id) DO UPDATE SET
                total_entries = excluded.total_entries,
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                last_entry_date = excluded.last_entry_date",
            params![
                stats.user_id.as_str(),
                format_timestamp(&now),
                stats.total_entries,
                stats.current_streak,
                stats.longest_streak,
                stats.last_entry_date.as_ref().map(format_timestamp),
            ],
        )?;

        tracing::debug!("Updated stats for user: {}", stats.user_id);
        Ok(())
    }

    fn recompute_user_stats(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<UserStats, StorageError> {
        // The write lock is taken before reading, so another connection cannot
        // slip an entry in between the read and the write
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        let dates = self.find_all_entry_dates_by_user(user_id)?;
        let stats = UserStats::recompute(user_id.clone(), &dates, local_day(&now));
        self.update_user_stats(&stats, now)?;

        tx.commit()?;
        Ok(stats)
    }

    fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let profile = self
            .conn
            .query_row(
                &format!("SELECT {} FROM user_profiles WHERE user_id = ?1", PROFILE_COLUMNS),
                params![user_id.as_str()],
                row_to_profile,
            )
            .optional()?;
        Ok(profile)
    }

    fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO user_profiles (user_id, name, email, notifications, daily_reminder, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                notifications = excluded.notifications,
                daily_reminder = excluded.daily_reminder",
            params![
                profile.user_id.as_str(),
                profile.name,
                profile.email,
                profile.notifications,
                profile.reminder_label(),
                format_timestamp(&profile.created_at),
            ],
        )?;

        tracing::debug!("Saved profile for user: {}", profile.user_id);
        Ok(())
    }

    fn list_profiles(&self) -> Result<Vec<UserProfile>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM user_profiles ORDER BY created_at",
            PROFILE_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_profile)?;

        let mut profiles = Vec::new();
        for profile in rows {
            profiles.push(profile?);
        }
        Ok(profiles)
    }
}
