use bucket_notifier::domain::{
    models::NotificationEvent,
    ports::{EmailSender, ObjectStorage},
    services::AttachmentNotifier,
};
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

/// Emails the object referenced by an object created notification
#[tracing::instrument(skip(notifier, event), fields(request_id = %event.context.request_id))]
pub async fn handler<S, E>(
    notifier: &AttachmentNotifier<S, E>,
    event: LambdaEvent<NotificationEvent>,
) -> Result<(), Error>
where
    S: ObjectStorage,
    E: EmailSender,
{
    tracing::trace!("processing event");

    notifier.notify(&event.payload).await?;

    tracing::trace!("processing complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucket_notifier::{
        domain::{
            email::AttachmentTemplate,
            models::{EmailRoute, ObjectDownloadError, StorageFetchError},
            services::AttachmentSettings,
        },
        outbound::mock::{MockEmailSender, MockObjectStorage},
    };
    use lambda_runtime::Context;
    use mockall::predicate::{always, eq};
    use std::path::Path;

    fn notifier(
        storage: MockObjectStorage,
        email: MockEmailSender,
        scratch_root: &Path,
    ) -> AttachmentNotifier<MockObjectStorage, MockEmailSender> {
        AttachmentNotifier::new(
            storage,
            email,
            AttachmentSettings {
                route: EmailRoute::parse("sender@example.com", "recipient@example.com").unwrap(),
                template: AttachmentTemplate::default(),
                scratch_root: scratch_root.to_path_buf(),
            },
        )
    }

    fn lambda_event(value: serde_json::Value) -> LambdaEvent<NotificationEvent> {
        LambdaEvent::new(serde_json::from_value(value).unwrap(), Context::default())
    }

    #[tokio::test]
    async fn it_handles_an_object_created_event() {
        let scratch_root = tempfile::tempdir().unwrap();

        let mut storage = MockObjectStorage::new();
        storage
            .expect_download()
            .times(1)
            .with(eq("b1"), eq("reports/q1.pdf"), always())
            .returning(|_, _, destination| {
                std::fs::write(destination, b"q1 numbers").unwrap();
                Box::pin(async { Ok(10) })
            });

        let mut email = MockEmailSender::new();
        email
            .expect_send_raw()
            .times(1)
            .withf(|_, _, raw_message| {
                String::from_utf8_lossy(raw_message).contains("q1.pdf")
            })
            .returning(|_, _, _| Box::pin(async { Ok(Some("message-1".to_string())) }));

        let notifier = notifier(storage, email, scratch_root.path());

        let event = lambda_event(serde_json::json!({
            "Records": [ { "s3": { "bucket": { "name": "b1" }, "object": { "key": "reports/q1.pdf" } } } ]
        }));

        handler(&notifier, event).await.unwrap();

        assert_eq!(std::fs::read_dir(scratch_root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn it_surfaces_fetch_failures_to_the_runtime() {
        let scratch_root = tempfile::tempdir().unwrap();

        let mut storage = MockObjectStorage::new();
        storage
            .expect_download()
            .times(1)
            .returning(|bucket, key, _| {
                let err = StorageFetchError {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source: anyhow::anyhow!("NoSuchKey"),
                };
                Box::pin(async move { Err(ObjectDownloadError::Fetch(err)) })
            });

        let mut email = MockEmailSender::new();
        email.expect_send_raw().times(0);

        let notifier = notifier(storage, email, scratch_root.path());

        let event = lambda_event(serde_json::json!({
            "Records": [ { "s3": { "bucket": { "name": "b1" }, "object": { "key": "gone.txt" } } } ]
        }));

        let err = handler(&notifier, event).await.unwrap_err();
        assert_eq!(err.to_string(), "could not fetch gone.txt from bucket b1");
        assert_eq!(std::fs::read_dir(scratch_root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn it_surfaces_malformed_events_to_the_runtime() {
        let scratch_root = tempfile::tempdir().unwrap();

        let mut storage = MockObjectStorage::new();
        storage.expect_download().times(0);
        let mut email = MockEmailSender::new();
        email.expect_send_raw().times(0);

        let notifier = notifier(storage, email, scratch_root.path());

        let err = handler(&notifier, lambda_event(serde_json::json!({ "Records": [] })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "event contains no records");
    }
}
