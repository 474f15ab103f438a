use std::path::PathBuf;

use anyhow::Context;
use bucket_notifier::domain::{
    email::AttachmentTemplate, models::EmailRoute, services::AttachmentSettings,
};

/// The configuration parameters for the lambda, pulled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// The address emails are sent from
    pub sender_email: String,

    /// Comma separated list of addresses emails are sent to
    pub recipient_emails: String,

    /// Subject of the email, defaults to [bucket_notifier::domain::email::DEFAULT_ATTACHMENT_SUBJECT]
    pub subject: Option<String>,

    /// Plain text body of the email, defaults to [bucket_notifier::domain::email::DEFAULT_ATTACHMENT_BODY]
    pub body: Option<String>,

    /// Where downloaded objects are staged, defaults to the OS temp dir
    pub scratch_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // an empty value is treated the same as an unset one
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let sender_email = var("SENDER_EMAIL").context("SENDER_EMAIL must be provided")?;
        let recipient_emails =
            var("RECIPIENT_EMAILS").context("RECIPIENT_EMAILS must be provided")?;

        Ok(Config {
            sender_email,
            recipient_emails,
            subject: var("ATTACHMENT_SUBJECT"),
            body: var("ATTACHMENT_BODY"),
            scratch_dir: var("SCRATCH_DIR").map(PathBuf::from),
        })
    }

    pub fn into_settings(self) -> anyhow::Result<AttachmentSettings> {
        let route = EmailRoute::parse(&self.sender_email, &self.recipient_emails)
            .context("invalid email route")?;

        let defaults = AttachmentTemplate::default();
        let template = AttachmentTemplate {
            subject: self.subject.unwrap_or(defaults.subject),
            body: self.body.unwrap_or(defaults.body),
        };

        Ok(AttachmentSettings {
            route,
            template,
            scratch_root: self.scratch_dir.unwrap_or_else(std::env::temp_dir),
        })
    }
}
