/// Notification scheduler
///
/// Runs the notification jobs from a background tokio task. The task owns
/// its own storage connection and mailer and wakes once a minute:
///
/// - daily reminders every minute
/// - weekly summaries on Sundays at 09:00
/// - milestone checks daily at 10:00
/// - streak achievements daily at 11:00
///
/// All times are local. A tick that arrives late also runs the minutes it
/// slept through, up to `MAX_CATCH_UP` of them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, Timelike, Utc, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::notifications::{run_job, Job, Mailer};
use crate::storage::SqliteStorage;

const TICK: Duration = Duration::from_secs(60);
/// Most minutes a single tick will run, the current one included
pub const MAX_CATCH_UP: i64 = 15;

/// Message types for scheduler communication
#[derive(Debug)]
pub enum SchedulerMessage {
    /// Run a job immediately, regardless of the time
    RunNow(Job),
    /// Stop the scheduler loop
    Shutdown,
}

/// Handle to the background scheduler task
pub struct Scheduler {
    sender: mpsc::Sender<SchedulerMessage>,
    handle: JoinHandle<()>,
}

impl Scheduler {
    /// Spawn the scheduler loop on the current tokio runtime
    pub fn start(storage: SqliteStorage, mailer: Box<dyn Mailer>, clock: Arc<dyn Clock>) -> Self {
        let (sender, receiver) = mpsc::channel(32);

        let handle = tokio::spawn(async move {
            scheduler_loop(storage, mailer, clock, receiver).await;
        });

        tracing::info!("Notification scheduler started");
        Self { sender, handle }
    }

    /// Ask the scheduler to run `job` now
    pub fn run_now(&self, job: Job) {
        if let Err(e) = self.sender.try_send(SchedulerMessage::RunNow(job)) {
            tracing::warn!("Could not queue {} job: {}", job, e);
        }
    }

    /// Stop the loop and wait for the task to finish
    pub async fn shutdown(self) {
        let _ = self.sender.send(SchedulerMessage::Shutdown).await;
        if let Err(e) = self.handle.await {
            tracing::error!("Scheduler task ended abnormally: {}", e);
        }
    }
}

/// Jobs due at a local minute
pub fn due_jobs(at: DateTime<Local>) -> Vec<Job> {
    let mut jobs = vec![Job::DailyReminders];

    if at.minute() == 0 {
        match at.hour() {
            9 if at.weekday() == Weekday::Sun => jobs.push(Job::WeeklySummaries),
            10 => jobs.push(Job::MilestoneChecks),
            11 => jobs.push(Job::StreakAchievements),
            _ => {}
        }
    }

    jobs
}

/// Local minutes a tick at `now` should run, oldest first
///
/// Every whole minute after `last` up to and including the current one, but
/// no more than the latest `MAX_CATCH_UP`. Empty if the current minute
/// already ran. If the clock went backwards only the current minute runs.
pub fn minutes_to_run(last: Option<DateTime<Local>>, now: DateTime<Local>) -> Vec<DateTime<Local>> {
    let current = truncate_to_minute(now);
    let first = match last.map(truncate_to_minute) {
        Some(last) if last == current => return Vec::new(),
        Some(last) if last < current => last + chrono::Duration::minutes(1),
        _ => current,
    };
    let first = first.max(current - chrono::Duration::minutes(MAX_CATCH_UP - 1));

    let mut minutes = Vec::new();
    let mut minute = first;
    while minute <= current {
        minutes.push(minute);
        minute = minute + chrono::Duration::minutes(1);
    }
    minutes
}

fn truncate_to_minute(at: DateTime<Local>) -> DateTime<Local> {
    at - chrono::Duration::seconds(at.second() as i64) - chrono::Duration::nanoseconds(at.nanosecond() as i64)
}

/// Main scheduler loop
async fn scheduler_loop(
    storage: SqliteStorage,
    mailer: Box<dyn Mailer>,
    clock: Arc<dyn Clock>,
    mut receiver: mpsc::Receiver<SchedulerMessage>,
) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Last local minute that ran, so a minute never runs twice
    let mut last_minute: Option<DateTime<Local>> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let local = clock.now().with_timezone(&Local);
                let minutes = minutes_to_run(last_minute, local);
                if minutes.len() > 1 {
                    tracing::warn!("Scheduler woke late, catching up {} minutes", minutes.len() - 1);
                }

                for minute in minutes {
                    let at = minute.with_timezone(&Utc);
                    for job in due_jobs(minute) {
                        if let Err(e) = run_job(job, &storage, mailer.as_ref(), at, &mut rng) {
                            tracing::error!("Scheduled job {} failed: {}", job, e);
                        }
                    }
                    last_minute = Some(minute);
                }
            }

            msg = receiver.recv() => {
                match msg {
                    Some(SchedulerMessage::RunNow(job)) => {
                        tracing::info!("Scheduler: running {} now", job);
                        if let Err(e) = run_job(job, &storage, mailer.as_ref(), clock.now(), &mut rng) {
                            tracing::error!("Job {} failed: {}", job, e);
                        }
                    }
                    Some(SchedulerMessage::Shutdown) | None => {
                        tracing::info!("Scheduler: shutting down");
                        break;
                    }
                }
            }
        }
    }
}
