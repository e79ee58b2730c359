/// Main entry point for the Mood Journal MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use mood_journal_mcp::config::{AnalyzerConfig, DEFAULT_AI_TIMEOUT_SECS, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use mood_journal_mcp::notifications::{LogMailer, Scheduler};
use mood_journal_mcp::{JournalServer, SqliteStorage, SystemClock, UserId};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".mood_journal");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("mood_journal");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("mood_journal");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".mood_journal");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("journal.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("mood_journal");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("journal.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the Mood Journal MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    /// User the journal belongs to
    #[arg(long, env = "JOURNAL_USER", default_value = "default")]
    user: String,

    /// Always use the built-in heuristic analysis
    #[arg(long, env = "USE_MOCK_AI", value_parser = parse_bool_flag, default_value = "false")]
    mock_ai: bool,

    /// API key for the Gemini analysis backend
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Base URL of the Gemini API
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    gemini_endpoint: String,

    /// Seconds to wait for the analysis backend before falling back
    #[arg(long, default_value_t = DEFAULT_AI_TIMEOUT_SECS)]
    ai_timeout_secs: u64,

    /// Run the notification scheduler alongside the server
    #[arg(long)]
    scheduler: bool,
}

fn parse_bool_flag(value: &str) -> Result<bool, String> {
    Ok(mood_journal_mcp::config::parse_flag(value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mood_journal_mcp={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Mood Journal MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let config = AnalyzerConfig {
        api_key: args.gemini_api_key.filter(|k| !k.trim().is_empty()),
        force_mock: args.mock_ai,
        model: args.gemini_model,
        endpoint: args.gemini_endpoint,
        timeout_secs: args.ai_timeout_secs,
    };

    let server = JournalServer::new(db_path.clone(), &config, UserId::new(args.user)).await?;

    let scheduler = if args.scheduler {
        let storage = SqliteStorage::new(db_path)?;
        Some(Scheduler::start(storage, Box::new(LogMailer), Arc::new(SystemClock)))
    } else {
        None
    };

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    server.run().await?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }

    info!("Mood Journal MCP server shutdown complete");
    Ok(())
}
