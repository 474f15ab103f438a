#![deny(missing_docs)]
//! Standardized process initialization for the notifier lambdas.
//! Every binary calls [NotifyEntrypoint::init] first so that log output has the same shape everywhere.

mod environment;

pub use environment::{Environment, UnknownEnvironment};

use tracing_subscriber::EnvFilter;

/// defines how a lambda binary should be initialized
#[derive(Debug)]
pub struct NotifyEntrypoint {
    env: Environment,
}

impl Default for NotifyEntrypoint {
    fn default() -> Self {
        NotifyEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [NotifyEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl NotifyEntrypoint {
    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                // cloudwatch does not render ansi escapes
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(())
    }
}
