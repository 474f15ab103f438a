//! Concrete implementations of the domain ports

#[cfg(feature = "aws")]
pub mod aws;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
