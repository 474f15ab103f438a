//! Email templates and MIME composition

use crate::domain::models::{EmailRoute, ObjectRef, RemovalRecord};
use mail_builder::{MessageBuilder, headers::address::Address};


pub static DEFAULT_ATTACHMENT_SUBJECT: &str = "File from S3 Bucket";
pub static DEFAULT_ATTACHMENT_BODY: &str = "Please find the attached file from S3.";

pub static DEFAULT_DELETION_SUBJECT: &str = "{action}Event from {bucket}";
pub static DEFAULT_DELETION_BODY: &str = r#"
        <br>
        This email is to notify you regarding {action} event.
        The object {key} is deleted.
        Source IP: {source_ip}
    "#;

/// Rendered in place of a source ip the notification did not carry
static UNKNOWN_SOURCE_IP: &str = "unknown";

/// Substitutes `{name}` placeholders in a single pass.
/// Placeholders without a matching variable are left untouched.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substitution = after.find('}').and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value, end))
        });

        match substitution {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Subject and plain text body of the attachment email.
/// Supports the `{bucket}`, `{key}` and `{file_name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentTemplate {
    pub subject: String,
    pub body: String,
}

impl Default for AttachmentTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_ATTACHMENT_SUBJECT.to_string(),
            body: DEFAULT_ATTACHMENT_BODY.to_string(),
        }
    }
}

impl AttachmentTemplate {
    fn vars(object: &ObjectRef) -> [(&'static str, &str); 3] {
        [
            ("bucket", object.bucket.as_str()),
            ("key", object.key.as_str()),
            ("file_name", object.file_name()),
        ]
    }

    pub fn subject(&self, object: &ObjectRef) -> String {
        render(&self.subject, &Self::vars(object))
    }

    pub fn body(&self, object: &ObjectRef) -> String {
        render(&self.body, &Self::vars(object))
    }
}

/// Subject and html body of the deletion email.
/// Supports the `{action}`, `{bucket}`, `{key}` and `{source_ip}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionTemplate {
    pub subject: String,
    pub body: String,
}

impl Default for DeletionTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_DELETION_SUBJECT.to_string(),
            body: DEFAULT_DELETION_BODY.to_string(),
        }
    }
}

impl DeletionTemplate {
    pub fn subject(&self, removal: &RemovalRecord) -> String {
        let source_ip = removal.source_ip.as_deref().unwrap_or(UNKNOWN_SOURCE_IP);
        render(
            &self.subject,
            &[
                ("action", removal.action.as_str()),
                ("bucket", removal.bucket.as_str()),
                ("key", removal.key.as_str()),
                ("source_ip", source_ip),
            ],
        )
    }

    /// Renders the html body, every interpolated value is html escaped
    pub fn body(&self, removal: &RemovalRecord) -> String {
        let source_ip = removal.source_ip.as_deref().unwrap_or(UNKNOWN_SOURCE_IP);
        let action = html_escape::encode_text(&removal.action);
        let bucket = html_escape::encode_text(&removal.bucket);
        let key = html_escape::encode_text(&removal.key);
        let source_ip = html_escape::encode_text(source_ip);

        render(
            &self.body,
            &[
                ("action", &*action),
                ("bucket", &*bucket),
                ("key", &*key),
                ("source_ip", &*source_ip),
            ],
        )
    }
}

/// Builds a multipart message carrying a plain text body and one file attachment
pub fn compose_attachment_email(
    route: &EmailRoute,
    subject: &str,
    body: &str,
    file_name: &str,
    content: Vec<u8>,
) -> std::io::Result<Vec<u8>> {
    let content_type = mime_guess::from_path(file_name).first_or_octet_stream();

    let recipients: Vec<Address> = route
        .recipients
        .iter()
        .map(|recipient| Address::new_address(None::<&str>, recipient.as_str()))
        .collect();

    MessageBuilder::new()
        .from(Address::new_address(None::<&str>, route.sender.as_str()))
        .to(Address::new_list(recipients))
        .subject(subject)
        .text_body(body)
        .attachment(content_type.essence_str().to_string(), file_name, content)
        .write_to_vec()
}
