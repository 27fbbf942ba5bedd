//! Application layer: the catalog session and its use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod catalog;
pub mod error;
pub mod error_ext;
pub mod seed;

pub use catalog::{CatalogService, NodeSummary};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
