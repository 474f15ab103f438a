//! Types which flow through the notifier domain

use chrono::{DateTime, Utc};
use thiserror::Error;


/// The id the email service assigned to a sent message
pub type MessageId = String;

/// The payload a bucket notification is delivered with.
///
/// Every field below the record list is optional on the wire so that a payload with missing
/// fields still deserializes and is rejected as a [MalformedEventError] by the services.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NotificationEvent {
    /// The records carried by this notification
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

/// A single storage action
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// e.g. `ObjectCreated:Put` or `ObjectRemoved:Delete`
    pub event_name: Option<String>,
    /// When the action happened
    pub event_time: Option<DateTime<Utc>>,
    /// Details about the request which triggered the action
    pub request_parameters: Option<RequestParameters>,
    /// The bucket and object the action applied to
    pub s3: Option<StorageEntity>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RequestParameters {
    /// The address the request originated from
    #[serde(rename = "sourceIPAddress")]
    pub source_ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct StorageEntity {
    pub bucket: Option<BucketEntity>,
    pub object: Option<ObjectEntity>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BucketEntity {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ObjectEntity {
    /// The url encoded object key
    pub key: Option<String>,
    pub size: Option<i64>,
}

impl NotificationRecord {
    fn bucket_name(&self) -> Option<&str> {
        self.s3.as_ref()?.bucket.as_ref()?.name.as_deref()
    }

    fn object_key(&self) -> Option<&str> {
        self.s3.as_ref()?.object.as_ref()?.key.as_deref()
    }

    fn source_ip(&self) -> Option<&str> {
        self.request_parameters
            .as_ref()?
            .source_ip_address
            .as_deref()
    }

    /// Validates this record as a reference to a single object.
    /// `index` is only used for error reporting.
    pub fn object_ref(&self, index: usize) -> Result<ObjectRef, MalformedEventError> {
        let bucket = self
            .bucket_name()
            .ok_or(MalformedEventError::MissingField {
                index,
                field: "s3.bucket.name",
            })?;
        let key = self.object_key().ok_or(MalformedEventError::MissingField {
            index,
            field: "s3.object.key",
        })?;

        ObjectRef::from_encoded(bucket, key)
    }

    /// Validates this record as an object removal.
    /// `index` is only used for error reporting.
    pub fn removal(&self, index: usize) -> Result<RemovalRecord, MalformedEventError> {
        let action = self
            .event_name
            .as_deref()
            .ok_or(MalformedEventError::MissingField {
                index,
                field: "eventName",
            })?;
        let bucket = self
            .bucket_name()
            .ok_or(MalformedEventError::MissingField {
                index,
                field: "s3.bucket.name",
            })?;
        let key = self.object_key().ok_or(MalformedEventError::MissingField {
            index,
            field: "s3.object.key",
        })?;

        Ok(RemovalRecord {
            action: action.to_string(),
            source_ip: self.source_ip().map(str::to_string),
            bucket: bucket.to_string(),
            key: decode_key(key)?,
            event_time: self.event_time,
        })
    }
}

impl NotificationEvent {
    /// The object referenced by the first record.
    /// Any further records are ignored.
    pub fn first_object(&self) -> Result<ObjectRef, MalformedEventError> {
        self.records
            .first()
            .ok_or(MalformedEventError::NoRecords)?
            .object_ref(0)
    }

    /// The removal described by the last record.
    /// Earlier records are ignored, a removal event is reported by its final record only.
    pub fn last_removal(&self) -> Result<RemovalRecord, MalformedEventError> {
        let (index, record) = self
            .records
            .iter()
            .enumerate()
            .next_back()
            .ok_or(MalformedEventError::NoRecords)?;
        record.removal(index)
    }
}

/// Storage notifications deliver keys form encoded, `+` for spaces and percent escapes for the rest.
fn decode_key(raw: &str) -> Result<String, MalformedEventError> {
    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| MalformedEventError::UndecodableKey {
            key: raw.to_string(),
        })
}

/// A validated reference to one object in a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// The bucket the object lives in
    pub bucket: String,
    /// The decoded object key
    pub key: String,
}

impl ObjectRef {
    /// Builds a reference from the url encoded key found in a notification
    pub fn from_encoded(bucket: &str, encoded_key: &str) -> Result<Self, MalformedEventError> {
        Self::new(bucket, decode_key(encoded_key)?)
    }

    /// Builds a reference from an already decoded key.
    /// The key must end in a usable file name.
    pub fn new(bucket: &str, key: String) -> Result<Self, MalformedEventError> {
        let object = Self {
            bucket: bucket.to_string(),
            key,
        };

        match object.file_name() {
            "" | "." | ".." => Err(MalformedEventError::InvalidFileName { key: object.key }),
            _ => Ok(object),
        }
    }

    /// The base file name of the object, the last `/` separated segment of the key
    pub fn file_name(&self) -> &str {
        match self.key.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.key,
        }
    }
}

/// The fields of an object removal that are reported by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRecord {
    /// The event name, e.g. `ObjectRemoved:Delete`
    pub action: String,
    pub source_ip: Option<String>,
    pub bucket: String,
    /// The decoded object key
    pub key: String,
    pub event_time: Option<DateTime<Utc>>,
}

/// Who an email is sent from and to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRoute {
    pub sender: String,
    pub recipients: Vec<String>,
}

impl EmailRoute {
    /// Builds a route from a sender and a comma separated list of recipients
    pub fn parse(sender: &str, recipients: &str) -> Result<Self, InvalidEmailRoute> {
        let sender = sender.trim();
        if sender.is_empty() {
            return Err(InvalidEmailRoute::MissingSender);
        }

        let recipients: Vec<String> = recipients
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        if recipients.is_empty() {
            return Err(InvalidEmailRoute::MissingRecipients);
        }

        Ok(Self {
            sender: sender.to_string(),
            recipients,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidEmailRoute {
    #[error("a sender address is required")]
    MissingSender,
    #[error("at least one recipient address is required")]
    MissingRecipients,
}

/// The notification payload did not contain what the handler needs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedEventError {
    #[error("event contains no records")]
    NoRecords,
    #[error("record {index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("object key {key} is not valid url encoding")]
    UndecodableKey { key: String },
    #[error("object key {key} does not end in a file name")]
    InvalidFileName { key: String },
}

/// The object could not be retrieved from storage
#[derive(Debug, Error)]
#[error("could not fetch {key} from bucket {bucket}")]
pub struct StorageFetchError {
    pub bucket: String,
    pub key: String,
    #[source]
    pub source: anyhow::Error,
}

/// A download into a local file failed, either at the storage service or on local disk
#[derive(Debug, Error)]
pub enum ObjectDownloadError {
    #[error(transparent)]
    Fetch(#[from] StorageFetchError),
    #[error("could not write object to scratch file: {0}")]
    Write(#[source] std::io::Error),
}

/// The email service rejected or failed to send a message
#[derive(Debug, Error)]
#[error("error sending email: {message}")]
pub struct EmailSendError {
    /// The message reported by the email service
    pub message: String,
}

/// Everything that can fail while handling a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    MalformedEvent(#[from] MalformedEventError),
    #[error(transparent)]
    StorageFetch(#[from] StorageFetchError),
    #[error(transparent)]
    EmailSend(#[from] EmailSendError),
    #[error("scratch file error: {0}")]
    Scratch(#[source] std::io::Error),
    #[error("could not compose email: {0}")]
    ComposeEmail(#[source] std::io::Error),
}

impl From<ObjectDownloadError> for NotifyError {
    fn from(err: ObjectDownloadError) -> Self {
        match err {
            ObjectDownloadError::Fetch(e) => NotifyError::StorageFetch(e),
            ObjectDownloadError::Write(e) => NotifyError::Scratch(e),
        }
    }
}
