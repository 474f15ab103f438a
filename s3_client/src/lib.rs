use std::path::Path;

mod download;

pub use download::DownloadError;

#[derive(Clone, Debug)]
pub struct S3 {
    inner: aws_sdk_s3::Client,
}

impl S3 {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Downloads the provided key from the bucket into a local file.
    #[tracing::instrument(skip(self))]
    pub async fn download_to_path(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64, DownloadError> {
        download::download_to_path(&self.inner, bucket, key, destination).await
    }
}
