/// Tool for browsing entries
///
/// This module implements the journal_list MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Mood, UserId};
use crate::storage::{EntryFilter, JournalStorage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::tools::{parse_date_param, DayAnchor, EntryView, ToolError};

/// Parameters for listing entries
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListEntriesParams {
    /// Page number, starting at 1 (default 1)
    #[serde(default)]
    pub page: Option<u32>,
    /// Entries per page, 1-50 (default 20)
    #[serde(default)]
    pub limit: Option<u32>,
    /// Only entries with this mood ("all" for no filter)
    #[serde(default)]
    pub mood: Option<String>,
    /// Earliest entry date to include (YYYY-MM-DD or ISO 8601)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Latest entry date to include (YYYY-MM-DD or ISO 8601)
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<EntryView>,
    pub pagination: Pagination,
}

/// List the caller's entries, newest first
pub fn list_entries<S: JournalStorage>(
    storage: &S,
    user_id: &UserId,
    params: ListEntriesParams,
) -> Result<ListEntriesResponse, ToolError> {
    let filter = build_filter(user_id, params)?;
    let page = storage.list_entries(&filter)?;

    let total_pages = page.total.div_ceil(filter.limit);

    Ok(ListEntriesResponse {
        entries: page.entries.iter().map(EntryView::from).collect(),
        pagination: Pagination {
            current_page: filter.page,
            total_pages,
            total: page.total,
            limit: filter.limit,
        },
    })
}

/// Validate list parameters into a storage filter
fn build_filter(user_id: &UserId, params: ListEntriesParams) -> Result<EntryFilter, ToolError> {
    let page = params.page.unwrap_or(1);
    if page < 1 {
        return Err(ToolError::InvalidParams("Page must be a positive integer".to_string()));
    }

    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(ToolError::InvalidParams(format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    let mood = match params.mood.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(m) if m.eq_ignore_ascii_case("all") => None,
        Some(m) => Some(
            Mood::parse(m).ok_or_else(|| ToolError::InvalidParams(format!("Invalid mood filter '{}'", m)))?,
        ),
    };

    let start = params
        .start_date
        .as_deref()
        .map(|d| parse_date_param(d, DayAnchor::StartOfDay))
        .transpose()?;
    let end = params
        .end_date
        .as_deref()
        .map(|d| parse_date_param(d, DayAnchor::EndOfDay))
        .transpose()?;

    Ok(EntryFilter {
        user_id: user_id.clone(),
        mood,
        start,
        end,
        page,
        limit,
    })
}
