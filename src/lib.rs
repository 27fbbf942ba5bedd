//! taxtree: an in-memory catalog of taxonomic classification paths.
//!
//! The [`domain::TaxonomyTree`] holds species of a single Class under the fixed
//! ranks Class, Order, Family, Genus and Species. The application layer wraps it
//! in a session ([`application::CatalogService`]) that the CLI drives through an
//! interactive menu.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
