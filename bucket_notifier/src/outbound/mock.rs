//! This module provides [mockall::mock] concrete structs [MockObjectStorage] and [MockEmailSender] which can be used for testing
use crate::domain::{
    models::{EmailSendError, MessageId, ObjectDownloadError},
    ports::{EmailSender, ObjectStorage},
};
use mockall::mock;
use std::path::Path;

const _NOT_PROD: () = const {
    assert!(
        cfg!(debug_assertions),
        "You are trying to include mock code in a production build please run `cargo tree -i bucket_notifier -e features -p <FAILING_PACKAGE>` to see how the mock feature is being included in [dependencies]"
    );
};

mock! {
    pub ObjectStorage {}
    impl ObjectStorage for ObjectStorage {
        fn download(
            &self,
            bucket: &str,
            key: &str,
            destination: &Path,
        ) -> impl Future<Output = Result<u64, ObjectDownloadError>> + Send;
    }
}

mock! {
    pub EmailSender {}
    impl EmailSender for EmailSender {
        fn send_raw(
            &self,
            sender: &str,
            recipients: &[String],
            raw_message: Vec<u8>,
        ) -> impl Future<Output = Result<Option<MessageId>, EmailSendError>> + Send;

        fn send_html(
            &self,
            sender: &str,
            recipients: &[String],
            subject: &str,
            html_body: &str,
        ) -> impl Future<Output = Result<Option<MessageId>, EmailSendError>> + Send;
    }
}
