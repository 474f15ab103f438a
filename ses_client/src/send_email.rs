use anyhow::Context;
use aws_sdk_sesv2::{
    self as ses,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::send_email::SendEmailError,
    primitives::Blob,
    types::{Body, Content, Destination, EmailContent, Message, RawMessage},
};

/// Pulls the message SES reported out of a failed send.
/// Falls back to the full error chain when the service did not report one.
fn reported_message<R>(err: &SdkError<SendEmailError, R>) -> String
where
    R: std::fmt::Debug,
{
    match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(err).to_string(),
    }
}

fn destination(to_emails: &[String]) -> Destination {
    Destination::builder()
        .set_to_addresses(Some(to_emails.to_vec()))
        .build()
}

/// Sends a raw MIME message
#[tracing::instrument(skip(client, raw_message))]
pub(crate) async fn send_raw_email(
    client: &ses::Client,
    from_email: &str,
    to_emails: &[String],
    raw_message: Vec<u8>,
) -> anyhow::Result<Option<String>> {
    let raw = RawMessage::builder()
        .data(Blob::new(raw_message))
        .build()
        .context("building RawMessage")?;

    let email_content = EmailContent::builder().raw(raw).build();

    let resp = client
        .send_email()
        .from_email_address(from_email)
        .destination(destination(to_emails))
        .content(email_content)
        .send()
        .await
        .map_err(|err| anyhow::anyhow!(reported_message(&err)))?;

    Ok(resp.message_id().map(str::to_string))
}

/// Sends a simple html email
#[tracing::instrument(skip(client, html_body))]
pub(crate) async fn send_html_email(
    client: &ses::Client,
    from_email: &str,
    to_emails: &[String],
    subject: &str,
    html_body: &str,
) -> anyhow::Result<Option<String>> {
    let subject_content = Content::builder()
        .data(subject)
        .charset("UTF-8")
        .build()
        .context("building Content")?;

    let body_content = Content::builder()
        .data(html_body)
        .charset("UTF-8")
        .build()
        .context("building Content")?;

    let body = Body::builder().html(body_content).build();

    let msg = Message::builder()
        .subject(subject_content)
        .body(body)
        .build();

    let email_content = EmailContent::builder().simple(msg).build();

    let resp = client
        .send_email()
        .from_email_address(from_email)
        .destination(destination(to_emails))
        .content(email_content)
        .send()
        .await
        .map_err(|err| anyhow::anyhow!(reported_message(&err)))?;

    Ok(resp.message_id().map(str::to_string))
}
