use bucket_notifier::domain::{
    models::NotificationEvent, ports::EmailSender, services::DeletionNotifier,
};
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

/// Returned to the runtime once the notice has been sent
pub static ACKNOWLEDGEMENT: &str = "Thanks";

/// Sends a notice for an object removed notification
#[tracing::instrument(skip(notifier, event), fields(request_id = %event.context.request_id))]
pub async fn handler<E>(
    notifier: &DeletionNotifier<E>,
    event: LambdaEvent<NotificationEvent>,
) -> Result<&'static str, Error>
where
    E: EmailSender,
{
    tracing::trace!("processing event");

    notifier.notify(&event.payload).await?;

    Ok(ACKNOWLEDGEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucket_notifier::{
        domain::{
            email::DeletionTemplate,
            models::{EmailRoute, EmailSendError},
            services::DeletionSettings,
        },
        outbound::mock::MockEmailSender,
    };
    use lambda_runtime::Context;

    fn notifier(email: MockEmailSender) -> DeletionNotifier<MockEmailSender> {
        DeletionNotifier::new(
            email,
            DeletionSettings {
                route: EmailRoute::parse("sender@example.com", "recipient@example.com").unwrap(),
                template: DeletionTemplate::default(),
            },
        )
    }

    fn removal_event() -> LambdaEvent<NotificationEvent> {
        let payload = serde_json::from_value(serde_json::json!({
            "Records": [ {
                "eventName": "ObjectRemoved:Delete",
                "requestParameters": { "sourceIPAddress": "1.2.3.4" },
                "s3": { "bucket": { "name": "b1" }, "object": { "key": "x.txt" } }
            } ]
        }))
        .unwrap();
        LambdaEvent::new(payload, Context::default())
    }

    #[tokio::test]
    async fn it_acknowledges_a_sent_notice() {
        let mut email = MockEmailSender::new();
        email
            .expect_send_html()
            .times(1)
            .withf(|_, _, subject, html_body| {
                subject.contains("ObjectRemoved:DeleteEvent from b1")
                    && html_body.contains("1.2.3.4")
                    && html_body.contains("x.txt")
            })
            .returning(|_, _, _, _| Box::pin(async { Ok(Some("message-1".to_string())) }));

        let result = handler(&notifier(email), removal_event()).await.unwrap();
        assert_eq!(result, "Thanks");
    }

    #[tokio::test]
    async fn a_send_failure_is_not_acknowledged() {
        let mut email = MockEmailSender::new();
        email.expect_send_html().times(1).returning(|_, _, _, _| {
            Box::pin(async {
                Err(EmailSendError {
                    message: "Email address is not verified.".to_string(),
                })
            })
        });

        let err = handler(&notifier(email), removal_event())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "error sending email: Email address is not verified."
        );
    }

    #[tokio::test]
    async fn a_malformed_event_sends_nothing() {
        let mut email = MockEmailSender::new();
        email.expect_send_html().times(0);

        let event = LambdaEvent::new(NotificationEvent::default(), Context::default());

        let err = handler(&notifier(email), event).await.unwrap_err();
        assert_eq!(err.to_string(), "event contains no records");
    }
}
