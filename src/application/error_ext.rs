//! Error conversion helpers for I/O performed on behalf of a use case
//!
//! Provides an extension trait for cleaner error handling with target context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context naming the action and its target to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// opener.open(url).with_context("open link", url)?;
    /// ```
    fn with_context(self, action: &str, target: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context(self, action: &str, target: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, target),
            source: Box::new(e),
        })
    }
}
