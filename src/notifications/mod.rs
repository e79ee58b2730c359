/// Notification mail: milestones, weekly summaries and daily reminders
///
/// Mail content is built from stored profiles, stats and entries. Delivery
/// goes through the `Mailer` trait so the transport can be swapped; the
/// default `LogMailer` writes messages to the log.

pub mod jobs;
pub mod milestones;
pub mod reminders;
pub mod scheduler;
pub mod summary;

pub use jobs::{run_job, Job, JobReport};
pub use milestones::{Milestone, STREAK_ACHIEVEMENTS};
pub use scheduler::Scheduler;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("No e-mail address for user {0}")]
    NoRecipient(String),

    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub trait Mailer: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

impl<M: Mailer + ?Sized> Mailer for Arc<M> {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        (**self).send(mail)
    }
}

/// Writes each message to the log instead of sending it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        tracing::info!("Mail to {}: {} | {}", mail.to, mail.subject, mail.body);
        Ok(())
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, oldest first
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.sent
            .lock()
            .map_err(|_| MailError::Delivery("mailbox lock poisoned".to_string()))?
            .push(mail.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            to: "sam@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "Time to write".to_string(),
        }
    }

    #[test]
    fn test_memory_mailer_records() {
        let mailer = Arc::new(MemoryMailer::new());
        let shared: Arc<MemoryMailer> = Arc::clone(&mailer);

        shared.send(&mail()).unwrap();
        shared.send(&mail()).unwrap();

        assert_eq!(mailer.sent().len(), 2);
        assert_eq!(mailer.sent()[0], mail());
    }

    #[test]
    fn test_log_mailer_accepts_everything() {
        assert!(LogMailer.send(&mail()).is_ok());
    }
}
