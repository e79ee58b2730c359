/// The scheduled notification jobs
///
/// Each job walks every stored profile, skips users who cannot receive mail,
/// and sends whatever applies. A failure for one user is logged and counted
/// but never stops the job.

use std::fmt;

use chrono::{DateTime, Duration, Local, Timelike, Utc};
use rand::Rng;
use serde::Serialize;

use crate::clock::{end_of_local_day, local_day};
use crate::domain::UserProfile;
use crate::notifications::milestones::{milestone_mail, milestones_for, streak_achievement, streak_mail};
use crate::notifications::reminders::{random_quote, reminder_mail};
use crate::notifications::summary::{summary_mail, weekly_summary};
use crate::notifications::{MailError, Mailer, OutgoingMail};
use crate::storage::{refresh_user_stats, JournalStorage, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    DailyReminders,
    WeeklySummaries,
    MilestoneChecks,
    StreakAchievements,
}

impl Job {
    pub const ALL: [Job; 4] = [
        Job::DailyReminders,
        Job::WeeklySummaries,
        Job::MilestoneChecks,
        Job::StreakAchievements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Job::DailyReminders => "daily_reminders",
            Job::WeeklySummaries => "weekly_summaries",
            Job::MilestoneChecks => "milestone_checks",
            Job::StreakAchievements => "streak_achievements",
        }
    }

    pub fn parse(s: &str) -> Option<Job> {
        let needle = s.trim().to_lowercase();
        Job::ALL.iter().copied().find(|job| job.as_str() == needle)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a job run did
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    /// Users eligible for mail from this job
    pub candidates: usize,
    pub sent: usize,
    pub failed: usize,
}

impl JobReport {
    fn record(&mut self, user: &UserProfile, result: Result<(), MailError>) {
        match result {
            Ok(()) => self.sent += 1,
            Err(e) => {
                tracing::warn!("Could not mail {}: {}", user.user_id, e);
                self.failed += 1;
            }
        }
    }
}

/// Run one job against every stored profile
pub fn run_job<S: JournalStorage + ?Sized, R: Rng + ?Sized>(
    job: Job,
    storage: &S,
    mailer: &dyn Mailer,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<JobReport, StorageError> {
    let profiles: Vec<UserProfile> = storage
        .list_profiles()?
        .into_iter()
        .filter(UserProfile::wants_mail)
        .collect();

    let mut report = JobReport::default();
    match job {
        Job::DailyReminders => send_daily_reminders(&profiles, mailer, now, rng, &mut report),
        Job::WeeklySummaries => {
            for profile in &profiles {
                if let Err(e) = send_weekly_summary(storage, profile, mailer, now, &mut report) {
                    tracing::warn!("Weekly summary failed for {}: {}", profile.user_id, e);
                    report.failed += 1;
                }
            }
        }
        Job::MilestoneChecks => {
            for profile in &profiles {
                if let Err(e) = send_milestones(storage, profile, mailer, now, &mut report) {
                    tracing::warn!("Milestone check failed for {}: {}", profile.user_id, e);
                    report.failed += 1;
                }
            }
        }
        Job::StreakAchievements => {
            for profile in &profiles {
                if let Err(e) = send_streak_achievement(storage, profile, mailer, now, &mut report) {
                    tracing::warn!("Streak check failed for {}: {}", profile.user_id, e);
                    report.failed += 1;
                }
            }
        }
    }

    tracing::info!(
        "Job {} finished: {} candidates, {} sent, {} failed",
        job,
        report.candidates,
        report.sent,
        report.failed
    );
    Ok(report)
}

fn deliver(mailer: &dyn Mailer, profile: &UserProfile, mail: Option<OutgoingMail>) -> Result<(), MailError> {
    let mail = mail.ok_or_else(|| MailError::NoRecipient(profile.user_id.to_string()))?;
    mailer.send(&mail)
}

/// Remind everyone whose reminder time is the current local minute
fn send_daily_reminders<R: Rng + ?Sized>(
    profiles: &[UserProfile],
    mailer: &dyn Mailer,
    now: DateTime<Utc>,
    rng: &mut R,
    report: &mut JobReport,
) {
    let local = now.with_timezone(&Local);
    let due: Vec<&UserProfile> = profiles
        .iter()
        .filter(|p| {
            p.daily_reminder
                .map(|t| t.hour() == local.hour() && t.minute() == local.minute())
                .unwrap_or(false)
        })
        .collect();

    if due.is_empty() {
        return;
    }

    // Everyone reminded in the same minute gets the same quote
    let quote = random_quote(rng);
    for profile in due {
        report.candidates += 1;
        let mail = reminder_mail(profile, local.hour(), &quote, rng);
        report.record(profile, deliver(mailer, profile, mail));
    }
}

fn send_weekly_summary<S: JournalStorage + ?Sized>(
    storage: &S,
    profile: &UserProfile,
    mailer: &dyn Mailer,
    now: DateTime<Utc>,
    report: &mut JobReport,
) -> Result<(), StorageError> {
    let week_ago = now - Duration::days(7);
    let stats = storage.get_user_stats(&profile.user_id)?;
    if !stats.last_entry_date.is_some_and(|last| last >= week_ago) {
        return Ok(());
    }

    let entries = storage.find_entries_by_user_and_range(&profile.user_id, week_ago, end_of_local_day(local_day(&now)))?;
    if let Some(summary) = weekly_summary(&entries) {
        report.candidates += 1;
        let mail = summary_mail(profile, &summary, local_day(&now));
        report.record(profile, deliver(mailer, profile, mail));
    }
    Ok(())
}

fn send_milestones<S: JournalStorage + ?Sized>(
    storage: &S,
    profile: &UserProfile,
    mailer: &dyn Mailer,
    now: DateTime<Utc>,
    report: &mut JobReport,
) -> Result<(), StorageError> {
    let stats = refresh_user_stats(storage, &profile.user_id, now)?;
    if stats.total_entries == 0 {
        return Ok(());
    }

    let reached = milestones_for(profile, &stats, now);
    if !reached.is_empty() {
        report.candidates += 1;
    }
    for milestone in reached {
        tracing::debug!("{} reached milestone {}", profile.user_id, milestone.key());
        report.record(profile, deliver(mailer, profile, milestone_mail(profile, milestone)));
    }
    Ok(())
}

fn send_streak_achievement<S: JournalStorage + ?Sized>(
    storage: &S,
    profile: &UserProfile,
    mailer: &dyn Mailer,
    now: DateTime<Utc>,
    report: &mut JobReport,
) -> Result<(), StorageError> {
    let stats = refresh_user_stats(storage, &profile.user_id, now)?;
    if let Some(days) = streak_achievement(&stats) {
        report.candidates += 1;
        report.record(profile, deliver(mailer, profile, streak_mail(profile, days)));
    }
    Ok(())
}
