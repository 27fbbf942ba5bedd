//! Fixed taxonomic ranks.

use std::fmt;

/// One of the five taxonomic levels, ordered from root to leaf.
///
/// The ordinal of a rank is its depth in a [`TaxonomyTree`](crate::domain::TaxonomyTree):
/// `Class` is the root (depth 0), `Species` the leaves (depth 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// All ranks in tree order.
    pub const ALL: [Rank; 5] = [
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Number of ranks, i.e. the length of every taxonomic path.
    pub const LEVELS: usize = Self::ALL.len();

    /// Depth of nodes carrying this rank.
    pub fn depth(self) -> usize {
        self as usize
    }

    pub fn from_depth(depth: usize) -> Option<Rank> {
        Self::ALL.get(depth).copied()
    }

    pub fn is_species(self) -> bool {
        self == Rank::Species
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Class => "Class",
            Rank::Order => "Order",
            Rank::Family => "Family",
            Rank::Genus => "Genus",
            Rank::Species => "Species",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
