use anyhow::Context;
use aws_sdk_s3 as s3;
use std::path::Path;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Failure while downloading an object into a local file
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The object could not be retrieved or its body could not be read
    #[error(transparent)]
    Fetch(anyhow::Error),
    /// The local file could not be opened or written
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    fn write(destination: &Path, source: std::io::Error) -> Self {
        DownloadError::Write {
            path: destination.display().to_string(),
            source,
        }
    }
}

/// Streams a given item from the bucket into the file at `destination`, truncating it first.
/// Returns the number of bytes written.
#[tracing::instrument(skip(client))]
pub(crate) async fn download_to_path(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    destination: &Path,
) -> Result<u64, DownloadError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .context(format!("could not get item {key} from bucket {bucket}"))
        .map_err(DownloadError::Fetch)?;

    let mut body = resp.body;

    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(|e| DownloadError::write(destination, e))?;

    let mut written = 0u64;
    while let Some(chunk) = body
        .try_next()
        .await
        .context("could not read object body")
        .map_err(DownloadError::Fetch)?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::write(destination, e))?;
        written += chunk.len() as u64;
    }

    // tokio buffers file writes, flush before the handle is dropped
    file.flush()
        .await
        .map_err(|e| DownloadError::write(destination, e))?;

    tracing::trace!(written, "downloaded object");

    Ok(written)
}
