/// UserProfile entity holding notification preferences
///
/// Account management lives elsewhere; the journal only needs to know who a
/// user is called, where to send mail and when they want to be reminded.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, UserId};

/// Notification preferences for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Name used in greetings
    pub name: String,
    /// Where notifications go (None disables mail even if `notifications` is on)
    pub email: Option<String>,
    /// Master switch for all notification mail
    pub notifications: bool,
    /// Local wall-clock time for the daily reminder
    pub daily_reminder: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile with notifications on and no reminder
    pub fn new(user_id: UserId, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: None,
            notifications: true,
            daily_reminder: None,
            created_at: now,
        }
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation {
                message: "Name cannot be empty".to_string(),
            });
        }
        if trimmed.chars().count() > 100 {
            return Err(DomainError::Validation {
                message: "Name cannot be longer than 100 characters".to_string(),
            });
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    /// Set or clear the e-mail address (an empty string clears it)
    pub fn set_email(&mut self, email: &str) -> Result<(), DomainError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            self.email = None;
            return Ok(());
        }

        let valid = match trimmed.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
            None => false,
        };
        if !valid {
            return Err(DomainError::InvalidValue {
                message: format!("'{}' is not a valid e-mail address", trimmed),
            });
        }

        self.email = Some(trimmed.to_lowercase());
        Ok(())
    }

    /// Parse a reminder time in `HH:MM` form (an empty string clears it)
    pub fn set_daily_reminder(&mut self, time: &str) -> Result<(), DomainError> {
        let trimmed = time.trim();
        if trimmed.is_empty() {
            self.daily_reminder = None;
            return Ok(());
        }

        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| DomainError::InvalidValue {
            message: format!("Reminder time must be HH:MM, got '{}'", trimmed),
        })?;
        self.daily_reminder = Some(parsed);
        Ok(())
    }

    /// True when mail can actually be delivered to this user
    pub fn wants_mail(&self) -> bool {
        self.notifications && self.email.is_some()
    }

    /// Reminder time formatted as `HH:MM`
    pub fn reminder_label(&self) -> Option<String> {
        self.daily_reminder.map(|t| t.format("%H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(UserId::new("u1"), "Sam", Utc::now())
    }

    #[test]
    fn test_new_profile_defaults() {
        let p = profile();
        assert!(p.notifications);
        assert!(p.email.is_none());
        assert!(!p.wants_mail());
    }

    #[test]
    fn test_set_email() {
        let mut p = profile();
        assert!(p.set_email("Sam@Example.com").is_ok());
        assert_eq!(p.email.as_deref(), Some("sam@example.com"));
        assert!(p.wants_mail());

        assert!(p.set_email("not-an-email").is_err());
        assert!(p.set_email("").is_ok());
        assert!(p.email.is_none());
    }

    #[test]
    fn test_set_daily_reminder() {
        let mut p = profile();
        p.set_daily_reminder("08:30").unwrap();
        assert_eq!(p.reminder_label().as_deref(), Some("08:30"));

        assert!(p.set_daily_reminder("8.30pm").is_err());
        p.set_daily_reminder(" ").unwrap();
        assert!(p.daily_reminder.is_none());
    }

    #[test]
    fn test_set_name_validation() {
        let mut p = profile();
        assert!(p.set_name("   ").is_err());
        assert!(p.set_name(&"x".repeat(101)).is_err());
        p.set_name("  Alex ").unwrap();
        assert_eq!(p.name, "Alex");
    }
}
