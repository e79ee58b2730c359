/// Tools for notification preferences
///
/// This module implements the profile_get and profile_update MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::{UserId, UserProfile, UserStats};
use crate::storage::JournalStorage;
use crate::tools::ToolError;

/// Parameters for changing notification preferences
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ProfileUpdateParams {
    /// Name used in reminder greetings
    #[serde(default)]
    pub name: Option<String>,
    /// Address for reminders and summaries (empty string removes it)
    #[serde(default)]
    pub email: Option<String>,
    /// Turn all notification mail on or off
    #[serde(default)]
    pub notifications: Option<bool>,
    /// Local time for the daily reminder as HH:MM (empty string turns it off)
    #[serde(default)]
    pub daily_reminder: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub notifications: bool,
    pub daily_reminder: Option<String>,
    pub total_entries: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl ProfileResponse {
    fn new(profile: &UserProfile, stats: &UserStats) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            notifications: profile.notifications,
            daily_reminder: profile.reminder_label(),
            total_entries: stats.total_entries,
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
        }
    }
}

/// Current preferences and streaks, with defaults for a user never seen before
pub fn get_profile<S: JournalStorage>(
    storage: &S,
    clock: &dyn Clock,
    user_id: &UserId,
) -> Result<ProfileResponse, ToolError> {
    let profile = load_or_default(storage, clock, user_id)?;
    let stats = storage.get_user_stats(user_id)?;
    Ok(ProfileResponse::new(&profile, &stats))
}

/// Change whichever preferences were given
pub fn update_profile<S: JournalStorage>(
    storage: &S,
    clock: &dyn Clock,
    user_id: &UserId,
    params: ProfileUpdateParams,
) -> Result<ProfileResponse, ToolError> {
    let mut profile = load_or_default(storage, clock, user_id)?;

    if let Some(name) = params.name.as_deref() {
        profile.set_name(name)?;
    }
    if let Some(email) = params.email.as_deref() {
        profile.set_email(email)?;
    }
    if let Some(notifications) = params.notifications {
        profile.notifications = notifications;
    }
    if let Some(time) = params.daily_reminder.as_deref() {
        profile.set_daily_reminder(time)?;
    }

    storage.upsert_profile(&profile)?;
    tracing::info!("Updated notification preferences for {}", user_id);

    let stats = storage.get_user_stats(user_id)?;
    Ok(ProfileResponse::new(&profile, &stats))
}

fn load_or_default<S: JournalStorage>(
    storage: &S,
    clock: &dyn Clock,
    user_id: &UserId,
) -> Result<UserProfile, ToolError> {
    Ok(storage
        .get_profile(user_id)?
        .unwrap_or_else(|| UserProfile::new(user_id.clone(), user_id.as_str(), clock.now())))
}
