//! Catalog session service
//!
//! Owns the taxonomy tree for the lifetime of a session and implements the
//! use cases offered by the menu: add, look up, update, delete, open links.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::error_ext::IoResultExt;
use crate::application::seed::EXAMPLES;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    DomainError, Index, InsertReport, Rank, TaxonNode, TaxonPath, TaxonomyTree, Traversal,
};
use crate::infrastructure::traits::LinkOpener;

/// Read-only view of a node returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub rank: Rank,
    pub name: String,
    pub common_name: Option<String>,
    pub reference_link: Option<String>,
    pub children: usize,
    /// Names from the Class down to this node
    pub lineage: Vec<String>,
}

/// Service holding the session's taxonomy tree.
pub struct CatalogService {
    tree: TaxonomyTree,
    opener: Arc<dyn LinkOpener>,
}

impl CatalogService {
    /// Create a session with an empty tree.
    pub fn new(opener: Arc<dyn LinkOpener>) -> Self {
        Self {
            tree: TaxonomyTree::new(),
            opener,
        }
    }

    pub fn tree(&self) -> &TaxonomyTree {
        &self.tree
    }

    /// Insert the built-in example species. Returns how many were inserted.
    #[instrument(level = "debug", skip(self))]
    pub fn seed_examples(&mut self) -> usize {
        let mut inserted = 0;
        for example in EXAMPLES {
            let result = TaxonPath::new(example.path).and_then(|path| {
                self.tree
                    .insert_path(&path, example.common_name, example.reference_link)
            });
            match result {
                Ok(_) => inserted += 1,
                // A tree holding another Class keeps its data
                Err(e) => warn!("skipping example '{}': {}", example.common_name, e),
            }
        }
        debug!("seeded {} example species", inserted);
        inserted
    }

    /// Add (or upsert) a species given its five rank names.
    ///
    /// A common name is required; an empty reference link means none.
    #[instrument(level = "debug", skip(self, segments))]
    pub fn add_species<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        common_name: &str,
        reference_link: &str,
    ) -> ApplicationResult<InsertReport> {
        let path = TaxonPath::new(segments)?;
        let common_name = common_name.trim();
        if common_name.is_empty() {
            return Err(DomainError::Validation("common name cannot be empty".to_string()).into());
        }
        Ok(self.tree.insert_path(&path, common_name, reference_link)?)
    }

    /// Look up a taxonomic or common name, ignoring case.
    #[instrument(level = "debug", skip(self))]
    pub fn lookup(&self, name: &str) -> ApplicationResult<Option<NodeSummary>> {
        let name = require_name(name)?;
        Ok(self
            .tree
            .find_by_name(name)
            .and_then(|idx| self.summary(idx)))
    }

    /// Replace the common name and reference link of a species.
    #[instrument(level = "debug", skip(self))]
    pub fn update_species(
        &mut self,
        name: &str,
        common_name: &str,
        reference_link: &str,
    ) -> ApplicationResult<NodeSummary> {
        let idx = self.species_index(name)?;
        self.tree.update_species(idx, common_name, reference_link)?;
        self.summary(idx)
            .ok_or_else(|| ApplicationError::NotFound(name.to_string()))
    }

    /// Delete a species. `Ok(None)` when nothing matches `name`.
    ///
    /// # Errors
    /// * [`DomainError::InvalidTarget`] when `name` resolves to a higher rank.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_species(&mut self, name: &str) -> ApplicationResult<Option<TaxonNode>> {
        match self.species_index(name) {
            Ok(idx) => Ok(Some(self.tree.remove_species(idx)?)),
            Err(ApplicationError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Open the reference link recorded for a species.
    #[instrument(level = "debug", skip(self))]
    pub fn open_link(&self, name: &str) -> ApplicationResult<String> {
        let idx = self.species_index(name)?;
        let link = self
            .tree
            .get(idx)
            .and_then(TaxonNode::reference_link)
            .ok_or_else(|| ApplicationError::NoLink(name.to_string()))?;
        self.opener.open(link).with_context("open link", link)?;
        Ok(link.to_string())
    }

    pub fn render(&self) -> String {
        self.tree.render()
    }

    /// Nodes in traversal order as `(Rank, name)` pairs.
    pub fn traverse(&self, order: Traversal) -> Vec<(Rank, String)> {
        self.tree
            .traverse(order)
            .map(|(_, node)| (node.rank(), node.name().to_string()))
            .collect()
    }

    /// Tear down the whole tree. Returns the number of nodes released.
    pub fn clear(&mut self) -> usize {
        self.tree.clear()
    }

    fn summary(&self, idx: Index) -> Option<NodeSummary> {
        let node = self.tree.get(idx)?;
        let lineage = self
            .tree
            .lineage(idx)?
            .into_iter()
            .filter_map(|i| self.tree.get(i).map(|n| n.name().to_string()))
            .collect();
        Some(NodeSummary {
            rank: node.rank(),
            name: node.name().to_string(),
            common_name: Some(node.common_name())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            reference_link: node.reference_link().map(str::to_string),
            children: node.children().len(),
            lineage,
        })
    }

    /// Resolve `name` to a species node or explain why it cannot be one.
    fn species_index(&self, name: &str) -> ApplicationResult<Index> {
        let name = require_name(name)?;
        let idx = self
            .tree
            .find_by_name(name)
            .ok_or_else(|| ApplicationError::NotFound(name.to_string()))?;
        match self.tree.get(idx) {
            Some(node) if node.is_species() => Ok(idx),
            Some(node) => Err(DomainError::InvalidTarget(format!(
                "'{}' is a {}, only species can be changed",
                node.name(),
                node.rank()
            ))
            .into()),
            None => Err(ApplicationError::NotFound(name.to_string())),
        }
    }
}

fn require_name(name: &str) -> ApplicationResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name cannot be empty".to_string()).into());
    }
    Ok(name)
}
