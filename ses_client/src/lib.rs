mod send_email;

use aws_sdk_sesv2 as ses;

#[derive(Clone, Debug)]
pub struct SesClient {
    inner: ses::Client,
}

impl SesClient {
    pub fn new(inner: ses::Client) -> Self {
        Self { inner }
    }

    /// Sends a fully formed MIME message.
    /// Returns the message id assigned by SES.
    #[tracing::instrument(skip(self, raw_message), fields(raw_len = raw_message.len()))]
    pub async fn send_raw_email(
        &self,
        from_email: &str,
        to_emails: &[String],
        raw_message: Vec<u8>,
    ) -> anyhow::Result<Option<String>> {
        send_email::send_raw_email(&self.inner, from_email, to_emails, raw_message).await
    }

    /// Sends a simple email with an html body.
    /// Returns the message id assigned by SES.
    #[tracing::instrument(skip(self, html_body))]
    pub async fn send_html_email(
        &self,
        from_email: &str,
        to_emails: &[String],
        subject: &str,
        html_body: &str,
    ) -> anyhow::Result<Option<String>> {
        send_email::send_html_email(&self.inner, from_email, to_emails, subject, html_body).await
    }
}
