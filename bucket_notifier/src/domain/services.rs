//! This module defines the services that are exposed by this crate

use std::path::PathBuf;

use crate::domain::{
    email::{AttachmentTemplate, DeletionTemplate, compose_attachment_email},
    models::{EmailRoute, MessageId, NotificationEvent, NotifyError},
    ports::{EmailSender, ObjectStorage},
    scratch::ScratchFile,
};


/// Everything the [AttachmentNotifier] needs besides its ports
#[derive(Debug, Clone)]
pub struct AttachmentSettings {
    pub route: EmailRoute,
    pub template: AttachmentTemplate,
    /// The directory per invocation scratch directories are created under
    pub scratch_root: PathBuf,
}

/// Emails newly created objects as attachments
#[derive(Debug)]
pub struct AttachmentNotifier<S, E> {
    storage: S,
    email: E,
    settings: AttachmentSettings,
}

impl<S, E> AttachmentNotifier<S, E>
where
    S: ObjectStorage,
    E: EmailSender,
{
    /// create a new instance of this service
    pub fn new(storage: S, email: E, settings: AttachmentSettings) -> Self {
        Self {
            storage,
            email,
            settings,
        }
    }

    /// Fetches the object referenced by the event's first record and emails it as an attachment.
    ///
    /// The local copy of the object is removed before this returns, on every path.
    #[tracing::instrument(skip(self, event), fields(record_count = event.records.len()))]
    pub async fn notify(&self, event: &NotificationEvent) -> Result<Option<MessageId>, NotifyError> {
        let object = event.first_object().inspect_err(|e| {
            tracing::error!(error=?e, "malformed object created event");
        })?;
        let file_name = object.file_name();
        tracing::trace!(bucket=%object.bucket, key=%object.key, "processing created object");

        let scratch =
            ScratchFile::create_in(&self.settings.scratch_root).map_err(NotifyError::Scratch)?;

        let written = self
            .storage
            .download(&object.bucket, &object.key, scratch.path())
            .await
            .inspect_err(|e| {
                tracing::error!(error=?e, "could not retrieve object from storage");
            })?;
        tracing::trace!(written, "downloaded object to scratch file");

        let content = tokio::fs::read(scratch.path())
            .await
            .map_err(NotifyError::Scratch)?;

        let raw_message = compose_attachment_email(
            &self.settings.route,
            &self.settings.template.subject(&object),
            &self.settings.template.body(&object),
            file_name,
            content,
        )
        .map_err(NotifyError::ComposeEmail)?;

        let message_id = self
            .email
            .send_raw(
                &self.settings.route.sender,
                &self.settings.route.recipients,
                raw_message,
            )
            .await
            .inspect_err(|e| {
                tracing::error!(error=%e.message, "error sending email");
            })?;

        tracing::info!(message_id=?message_id, "email sent successfully");

        if let Err(e) = scratch.close() {
            tracing::warn!(error=?e, "could not remove scratch directory");
        }

        Ok(message_id)
    }
}

/// Everything the [DeletionNotifier] needs besides its port
#[derive(Debug, Clone)]
pub struct DeletionSettings {
    pub route: EmailRoute,
    pub template: DeletionTemplate,
}

/// Emails a notice describing a removed object
#[derive(Debug)]
pub struct DeletionNotifier<E> {
    email: E,
    settings: DeletionSettings,
}

impl<E> DeletionNotifier<E>
where
    E: EmailSender,
{
    /// create a new instance of this service
    pub fn new(email: E, settings: DeletionSettings) -> Self {
        Self { email, settings }
    }

    /// Sends one notice for the removal described by the event's last record
    #[tracing::instrument(skip(self, event), fields(record_count = event.records.len()))]
    pub async fn notify(&self, event: &NotificationEvent) -> Result<Option<MessageId>, NotifyError> {
        if event.records.len() > 1 {
            tracing::warn!("removal event carries multiple records, only the last one is reported");
        }

        let removal = event.last_removal().inspect_err(|e| {
            tracing::error!(error=?e, "malformed object removed event");
        })?;
        tracing::trace!(bucket=%removal.bucket, key=%removal.key, event_time=?removal.event_time, "processing removed object");

        let message_id = self
            .email
            .send_html(
                &self.settings.route.sender,
                &self.settings.route.recipients,
                &self.settings.template.subject(&removal),
                &self.settings.template.body(&removal),
            )
            .await?;

        tracing::info!(message_id=?message_id, "deletion notice sent");

        Ok(message_id)
    }
}
