//! Port implementations backed by the AWS clients

use std::path::Path;

use crate::domain::{
    models::{EmailSendError, MessageId, ObjectDownloadError, StorageFetchError},
    ports::{EmailSender, ObjectStorage},
};

fn download_error(bucket: &str, key: &str, err: s3_client::DownloadError) -> ObjectDownloadError {
    match err {
        s3_client::DownloadError::Fetch(source) => ObjectDownloadError::Fetch(StorageFetchError {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source,
        }),
        s3_client::DownloadError::Write { source, .. } => ObjectDownloadError::Write(source),
    }
}

/// the ses client already reduces failures to the message the service reported
fn email_send_error(err: anyhow::Error) -> EmailSendError {
    EmailSendError {
        message: err.to_string(),
    }
}

impl ObjectStorage for s3_client::S3 {
    async fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64, ObjectDownloadError> {
        self.download_to_path(bucket, key, destination)
            .await
            .map_err(|e| download_error(bucket, key, e))
    }
}

impl EmailSender for ses_client::SesClient {
    async fn send_raw(
        &self,
        sender: &str,
        recipients: &[String],
        raw_message: Vec<u8>,
    ) -> Result<Option<MessageId>, EmailSendError> {
        self.send_raw_email(sender, recipients, raw_message)
            .await
            .map_err(email_send_error)
    }

    async fn send_html(
        &self,
        sender: &str,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<Option<MessageId>, EmailSendError> {
        self.send_html_email(sender, recipients, subject, html_body)
            .await
            .map_err(email_send_error)
    }
}
