/// Tool for reading a single entry
///
/// This module implements the journal_get MCP tool.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::UserId;
use crate::storage::JournalStorage;
use crate::tools::{parse_entry_id, EntryView, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetEntryParams {
    /// ID of the entry to fetch
    pub entry_id: String,
}

/// Fetch one of the caller's entries
pub fn get_entry<S: JournalStorage>(
    storage: &S,
    user_id: &UserId,
    params: GetEntryParams,
) -> Result<EntryView, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;
    let entry = storage.get_entry(user_id, &entry_id)?;
    Ok(EntryView::from(&entry))
}
