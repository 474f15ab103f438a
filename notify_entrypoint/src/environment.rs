use std::str::FromStr;
use thiserror::Error;

const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The environment the lambda is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownEnvironment(String);

impl Environment {
    /// Attempt to read the environment from the `ENVIRONMENT` variable.
    /// Returns `None` when the variable is unset.
    #[tracing::instrument(err, level = tracing::Level::TRACE)]
    pub fn new_from_env() -> Result<Option<Self>, UnknownEnvironment> {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(value) => Ok(Some(Self::from_str(&value)?)),
            Err(_) => Ok(None),
        }
    }

    /// read the environment, falling back to production when it is missing or unrecognized
    pub fn new_or_prod() -> Self {
        Self::new_from_env()
            .ok()
            .flatten()
            .unwrap_or(Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(environment: &str) -> Result<Self, UnknownEnvironment> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownEnvironment(s.to_string())),
        }
    }
}
