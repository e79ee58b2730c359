/// Tool for deleting entries
///
/// This module implements the journal_delete MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::UserId;
use crate::storage::{refresh_user_stats, JournalStorage};
use crate::tools::{parse_entry_id, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteEntryParams {
    /// ID of the entry to delete
    pub entry_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteEntryResponse {
    pub success: bool,
    pub message: String,
    pub total_entries: u32,
    pub current_streak: u32,
}

/// Delete one of the caller's entries and recount their stats
pub fn delete_entry<S: JournalStorage>(
    storage: &S,
    clock: &dyn Clock,
    user_id: &UserId,
    params: DeleteEntryParams,
) -> Result<DeleteEntryResponse, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;
    storage.delete_entry(user_id, &entry_id)?;

    let stats = refresh_user_stats(storage, user_id, clock.now())?;
    tracing::info!("Deleted entry {} for {}", entry_id, user_id);

    Ok(DeleteEntryResponse {
        success: true,
        message: "Journal entry deleted successfully".to_string(),
        total_entries: stats.total_entries,
        current_streak: stats.current_streak,
    })
}
