/// Milestone and streak achievement detection
///
/// Milestones are checked once a day against freshly recomputed stats, so a
/// milestone fires on the day a user's counts hit it exactly.

use chrono::{DateTime, Duration, Months, Utc};

use crate::domain::{UserProfile, UserStats};
use crate::notifications::OutgoingMail;

/// Current-streak lengths that earn an achievement mail
pub const STREAK_ACHIEVEMENTS: [u32; 7] = [7, 14, 30, 50, 100, 200, 365];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    FirstEntry,
    WeekStreak,
    MonthStreak,
    HundredEntries,
    YearAnniversary,
}

impl Milestone {
    pub fn key(&self) -> &'static str {
        match self {
            Milestone::FirstEntry => "first_entry",
            Milestone::WeekStreak => "week_streak",
            Milestone::MonthStreak => "month_streak",
            Milestone::HundredEntries => "hundred_entries",
            Milestone::YearAnniversary => "year_anniversary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Milestone::FirstEntry => "🎉 First Entry Complete!",
            Milestone::WeekStreak => "🔥 One Week Streak!",
            Milestone::MonthStreak => "🌟 One Month Strong!",
            Milestone::HundredEntries => "💯 Century Milestone!",
            Milestone::YearAnniversary => "🎂 One Year Anniversary!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Milestone::FirstEntry => "Congratulations on writing your first journal entry! You've taken the first step on your mental wellness journey.",
            Milestone::WeekStreak => "Amazing! You've journaled for a full week. You're building a powerful habit for mental wellness.",
            Milestone::MonthStreak => "Incredible dedication! A full month of consistent journaling shows your commitment to self-growth.",
            Milestone::HundredEntries => "Wow! 100 journal entries is a remarkable achievement. You've built a treasure trove of self-reflection.",
            Milestone::YearAnniversary => "A full year of journaling! Your dedication to mental wellness is truly inspiring.",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Milestone::FirstEntry => "🌱 New Beginner",
            Milestone::WeekStreak => "📅 Week Warrior",
            Milestone::MonthStreak => "🗓️ Monthly Master",
            Milestone::HundredEntries => "💯 Century Writer",
            Milestone::YearAnniversary => "🎂 Annual Achiever",
        }
    }
}

/// Milestones a user has hit as of `now`
pub fn milestones_for(profile: &UserProfile, stats: &UserStats, now: DateTime<Utc>) -> Vec<Milestone> {
    let mut reached = Vec::new();

    if stats.total_entries == 1 {
        reached.push(Milestone::FirstEntry);
    }
    if stats.current_streak == 7 {
        reached.push(Milestone::WeekStreak);
    }
    if stats.current_streak == 30 {
        reached.push(Milestone::MonthStreak);
    }
    if stats.total_entries == 100 {
        reached.push(Milestone::HundredEntries);
    }
    if is_anniversary(profile.created_at, now) {
        reached.push(Milestone::YearAnniversary);
    }

    reached
}

/// True when `created_at` is within a day of exactly one year before `now`
fn is_anniversary(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match now.checked_sub_months(Months::new(12)) {
        Some(year_ago) => (created_at - year_ago).num_seconds().abs() < Duration::days(1).num_seconds(),
        None => false,
    }
}

/// The achievement level a current streak sits on, if any
pub fn streak_achievement(stats: &UserStats) -> Option<u32> {
    STREAK_ACHIEVEMENTS
        .iter()
        .copied()
        .find(|days| *days == stats.current_streak)
}

pub fn milestone_mail(profile: &UserProfile, milestone: Milestone) -> Option<OutgoingMail> {
    let to = profile.email.clone()?;
    Some(OutgoingMail {
        to,
        subject: format!("{} - {}", milestone.title(), profile.name),
        body: format!(
            "{} Congratulations {}! {} Badge earned: {}",
            milestone.title(),
            profile.name,
            milestone.message(),
            milestone.badge()
        ),
    })
}

pub fn streak_mail(profile: &UserProfile, days: u32) -> Option<OutgoingMail> {
    let to = profile.email.clone()?;
    Some(OutgoingMail {
        to,
        subject: format!("🏆 Congratulations! {}-Day Streak Achievement", days),
        body: format!(
            "Congratulations {}! You've achieved a {}-day journaling streak! Keep up the great work!",
            profile.name, days
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    fn profile(created_at: DateTime<Utc>) -> UserProfile {
        let mut p = UserProfile::new(UserId::new("u1"), "Sam", created_at);
        p.set_email("sam@example.com").unwrap();
        p
    }

    fn stats(total: u32, current: u32) -> UserStats {
        UserStats {
            user_id: UserId::new("u1"),
            total_entries: total,
            current_streak: current,
            longest_streak: current,
            last_entry_date: Some(now()),
        }
    }

    #[test]
    fn test_first_entry() {
        let found = milestones_for(&profile(now()), &stats(1, 1), now());
        assert_eq!(found, vec![Milestone::FirstEntry]);
    }

    #[test]
    fn test_streaks_and_century() {
        let p = profile(now());
        assert_eq!(milestones_for(&p, &stats(12, 7), now()), vec![Milestone::WeekStreak]);
        assert_eq!(milestones_for(&p, &stats(40, 30), now()), vec![Milestone::MonthStreak]);
        assert_eq!(milestones_for(&p, &stats(100, 3), now()), vec![Milestone::HundredEntries]);
        assert!(milestones_for(&p, &stats(8, 8), now()).is_empty());
    }

    #[test]
    fn test_anniversary_window() {
        let year_ago = Utc.with_ymd_and_hms(2023, 6, 15, 10, 0, 0).unwrap();

        let found = milestones_for(&profile(year_ago + Duration::hours(20)), &stats(50, 0), now());
        assert_eq!(found, vec![Milestone::YearAnniversary]);

        let found = milestones_for(&profile(year_ago - Duration::days(2)), &stats(50, 0), now());
        assert!(found.is_empty());
    }

    #[test]
    fn test_streak_achievement_levels() {
        assert_eq!(streak_achievement(&stats(20, 14)), Some(14));
        assert_eq!(streak_achievement(&stats(400, 365)), Some(365));
        assert_eq!(streak_achievement(&stats(20, 15)), None);
    }

    #[test]
    fn test_mail_needs_address() {
        let mut p = profile(now());
        let mail = streak_mail(&p, 14).unwrap();
        assert_eq!(mail.subject, "🏆 Congratulations! 14-Day Streak Achievement");
        assert_eq!(mail.to, "sam@example.com");

        let mail = milestone_mail(&p, Milestone::FirstEntry).unwrap();
        assert_eq!(mail.subject, "🎉 First Entry Complete! - Sam");

        p.set_email("").unwrap();
        assert!(milestone_mail(&p, Milestone::WeekStreak).is_none());
    }
}
