use crate::domain::model::MailMessage;
use crate::domain::ports::MailTransport;
use crate::utils::error::Result;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub const SUBJECT_PREFIX: &str = "Dominoes Round";
pub const BODY_PREFACE: &str = "These are your dominoes:\n\n";

/// Label that keeps each run's subject line distinct, e.g. `07:45PM on October 17, 2026`.
pub fn timestamp_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%I:%M%p on %B %d, %Y").to_string()
}

pub fn compose(recipient: &str, hand_text: &str, timestamp_label: &str) -> MailMessage {
    MailMessage {
        to: recipient.to_string(),
        subject: format!("{} {}", SUBJECT_PREFIX, timestamp_label),
        body: format!("{}{}", BODY_PREFACE, hand_text),
    }
}

pub struct Notifier<T: MailTransport> {
    transport: T,
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// One send attempt, no retry.
    pub async fn notify(&self, recipient: &str, hand_text: &str, timestamp_label: &str) -> Result<()> {
        let message = compose(recipient, hand_text, timestamp_label);
        tracing::debug!(recipient, subject = %message.subject, "Submitting hand");
        self.transport.send(&message).await
    }

    pub async fn verify(&self) -> Result<()> {
        self.transport.verify().await
    }
}
