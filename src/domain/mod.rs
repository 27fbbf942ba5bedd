//! Domain layer: the taxonomy tree and its rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod path;
pub mod rank;
pub mod render;
pub mod traversal;

pub use arena::{InsertReport, SpeciesStatus, TaxonNode, TaxonomyTree};
pub use error::{DomainError, DomainResult};
pub use generational_arena::Index;
pub use path::TaxonPath;
pub use rank::Rank;
pub use render::{label, TreeNodeConvert};
pub use traversal::{Traversal, Traverse};
