//! This module defines the ports the notifier domain requires

use std::path::Path;

use crate::domain::models::{EmailSendError, MessageId, ObjectDownloadError};

/// Trait for retrieving objects out of bucket storage
pub trait ObjectStorage: Send + Sync + 'static {
    /// download the object at `bucket`/`key` into the existing file at `destination`, replacing its contents.
    /// Returns the number of bytes written.
    fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> impl Future<Output = Result<u64, ObjectDownloadError>> + Send;
}

/// Trait for handing messages to an email delivery service
pub trait EmailSender: Send + Sync + 'static {
    /// submit a fully formed MIME message
    fn send_raw(
        &self,
        sender: &str,
        recipients: &[String],
        raw_message: Vec<u8>,
    ) -> impl Future<Output = Result<Option<MessageId>, EmailSendError>> + Send;

    /// submit a message with a subject and an html body, letting the service build the MIME
    fn send_html(
        &self,
        sender: &str,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> impl Future<Output = Result<Option<MessageId>, EmailSendError>> + Send;
}
