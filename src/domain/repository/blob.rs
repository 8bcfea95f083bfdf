use std::error::Error as StdError;

use snafu::prelude::*;

/// An abstract key-value store holding serialized records.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Get the record stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store could not be read.
    async fn get(&self, key: &str) -> Result<Option<String>, BlobStoreError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store could not be written.
    async fn set(&self, key: &str, value: String) -> Result<(), BlobStoreError>;
}

/// An error type of accessing a [`BlobStore`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub))]
pub enum BlobStoreError {
    #[snafu(display("Invalid store key `{key}`"))]
    #[non_exhaustive]
    InvalidKey { key: String },
    #[snafu(whatever, display("Store access failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
