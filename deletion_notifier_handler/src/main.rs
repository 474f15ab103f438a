#![recursion_limit = "256"]

use anyhow::Context;
use bucket_notifier::domain::{models::NotificationEvent, services::DeletionNotifier};
use config::Config;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use notify_entrypoint::NotifyEntrypoint;
use std::sync::Arc;

mod config;
mod handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    NotifyEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let settings = Config::from_env()
        .and_then(Config::into_settings)
        .context("all necessary env vars should be available")?;

    tracing::trace!("initialized config");

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let ses_client = ses_client::SesClient::new(aws_sdk_sesv2::Client::new(&aws_config));
    tracing::trace!("initialized ses client");

    let notifier = Arc::new(DeletionNotifier::new(ses_client, settings));

    let func = service_fn(move |event: LambdaEvent<NotificationEvent>| {
        let notifier = notifier.clone();
        async move { handler::handler(notifier.as_ref(), event).await }
    });

    run(func).await
}
