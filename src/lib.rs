/// Public library interface for the Mood Journal MCP server
///
/// This module exports the main server implementation and the public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub mod analysis;
pub mod analytics;
pub mod clock;
pub mod config;
pub mod domain;
pub mod mcp;
pub mod notifications;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use analysis::MoodAnalyzer;
pub use analytics::{AggregateStats, AnalyticsEngine, StatsRange};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AnalyzerConfig;
pub use domain::*;
pub use mcp::McpServer;
pub use storage::{JournalStorage, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Journal server behind the MCP protocol
///
/// Owns the SQLite connection, the mood analyzer and the analytics engine.
/// Every tool call acts on behalf of a single configured user.
pub struct JournalServer {
    storage: SqliteStorage,
    analyzer: MoodAnalyzer,
    analytics: AnalyticsEngine,
    clock: Arc<dyn Clock>,
    user_id: UserId,
}

impl JournalServer {
    /// Open (or create) the journal database and build the analyzer
    pub async fn new(db_path: PathBuf, config: &AnalyzerConfig, user_id: UserId) -> Result<Self, ServerError> {
        tracing::info!("Initializing Mood Journal server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let analyzer = MoodAnalyzer::from_config(config, Arc::clone(&clock));

        Ok(Self::with_parts(storage, analyzer, clock, user_id))
    }

    /// Assemble a server from ready-made parts
    pub fn with_parts(storage: SqliteStorage, analyzer: MoodAnalyzer, clock: Arc<dyn Clock>, user_id: UserId) -> Self {
        Self {
            storage,
            analyzer,
            analytics: AnalyticsEngine::new(),
            clock,
            user_id,
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let stats = self.storage.get_user_stats(&self.user_id)?;
        tracing::info!(
            "Server started for {}: {} entries, {} day streak, analysis delegate {}",
            self.user_id,
            stats.total_entries,
            stats.current_streak,
            if self.analyzer.has_delegate() { "enabled" } else { "disabled" }
        );

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    pub fn analyzer(&self) -> &MoodAnalyzer {
        &self.analyzer
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
