use anyhow::Context;
use bucket_notifier::domain::{
    email::DeletionTemplate, models::EmailRoute, services::DeletionSettings,
};

/// The configuration parameters for the lambda, pulled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// The address notices are sent from
    pub sender_email: String,

    /// Comma separated list of addresses notices are sent to
    pub recipient_emails: String,

    /// Subject template, defaults to [bucket_notifier::domain::email::DEFAULT_DELETION_SUBJECT]
    pub subject: Option<String>,

    /// Html body template, defaults to [bucket_notifier::domain::email::DEFAULT_DELETION_BODY]
    pub body: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let sender_email = var("SENDER_EMAIL").context("SENDER_EMAIL must be provided")?;
        let recipient_emails =
            var("RECIPIENT_EMAILS").context("RECIPIENT_EMAILS must be provided")?;

        Ok(Config {
            sender_email,
            recipient_emails,
            subject: var("DELETION_SUBJECT"),
            body: var("DELETION_BODY"),
        })
    }

    pub fn into_settings(self) -> anyhow::Result<DeletionSettings> {
        let route = EmailRoute::parse(&self.sender_email, &self.recipient_emails)
            .context("invalid email route")?;

        let defaults = DeletionTemplate::default();

        Ok(DeletionSettings {
            route,
            template: DeletionTemplate {
                subject: self.subject.unwrap_or(defaults.subject),
                body: self.body.unwrap_or(defaults.body),
            },
        })
    }
}
