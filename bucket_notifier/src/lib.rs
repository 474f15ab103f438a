//! This crate turns bucket notifications into emails, following the hexagonal architecture pattern.
//! The [domain] owns event validation, templating and the two notifier services, [outbound]
//! provides the storage and email adapters they run against.

pub mod domain;
pub mod outbound;
