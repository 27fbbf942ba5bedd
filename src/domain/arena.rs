//! Arena-backed taxonomy tree.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, info, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::TaxonPath;
use crate::domain::rank::Rank;

/// One taxonomic unit in the tree.
///
/// Rank and position are fixed at creation; only the species annotations
/// (`common_name`, `reference_link`) change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonNode {
    name: String,
    rank: Rank,
    common_name: String,
    reference_link: Option<String>,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Indices of child nodes in insertion order
    children: Vec<Index>,
}

impl TaxonNode {
    fn new(name: &str, rank: Rank, parent: Option<Index>) -> Self {
        Self {
            name: name.to_string(),
            rank,
            common_name: String::new(),
            reference_link: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Common name, empty for every rank except `Species`.
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    pub fn reference_link(&self) -> Option<&str> {
        self.reference_link.as_deref()
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_species(&self) -> bool {
        self.rank.is_species()
    }

    /// Case-insensitive match against the taxonomic name, and for species
    /// also against a non-empty common name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.eq_ignore_ascii_case(query)
            || (self.is_species()
                && !self.common_name.is_empty()
                && self.common_name.eq_ignore_ascii_case(query))
    }

    fn set_annotations(&mut self, common_name: &str, reference_link: &str) {
        self.common_name = common_name.to_string();
        self.reference_link = normalize_link(reference_link);
    }
}

impl fmt::Display for TaxonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.rank, self.name)
    }
}

fn normalize_link(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        None
    } else {
        Some(link.to_string())
    }
}

/// What happened to the species node during an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesStatus {
    /// A new species node was created
    Added,
    /// The species existed and its annotations changed
    Updated,
    /// The species existed with identical annotations
    Unchanged,
}

/// Outcome of [`TaxonomyTree::insert_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReport {
    pub root: Index,
    pub species: Index,
    /// Nodes created on the way down, root first
    pub created: Vec<(Rank, String)>,
    pub species_status: SpeciesStatus,
}

/// Taxonomy tree holding species of a single Class.
///
/// Nodes live in a generational arena; each node records its parent index so
/// removals never rescan from the root. Stale indices are detected, not dangling.
#[derive(Debug)]
pub struct TaxonomyTree {
    /// Arena storage for all tree nodes
    arena: Arena<TaxonNode>,
    /// Index of the Class node, None for empty trees
    root: Option<Index>,
}

impl Default for TaxonomyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TaxonomyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get(&self, idx: Index) -> Option<&TaxonNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a full Class → Species path, creating missing ranks on demand.
    ///
    /// An existing species is upserted: its annotations are overwritten with the
    /// supplied values. All validation happens before the tree is touched.
    ///
    /// # Errors
    /// * [`DomainError::Conflict`] when the tree already holds a different Class.
    #[instrument(level = "debug", skip(self, path), fields(path = %path))]
    pub fn insert_path(
        &mut self,
        path: &TaxonPath,
        common_name: &str,
        reference_link: &str,
    ) -> DomainResult<InsertReport> {
        if let Some(root) = self.root.and_then(|idx| self.arena.get(idx)) {
            if !root.name.eq_ignore_ascii_case(path.class()) {
                return Err(DomainError::Conflict {
                    existing: root.name.clone(),
                    requested: path.class().to_string(),
                });
            }
        }

        let mut created = Vec::new();
        let root_idx = match self.root {
            Some(idx) => idx,
            None => {
                let idx = self.arena.insert(TaxonNode::new(path.class(), Rank::Class, None));
                self.root = Some(idx);
                created.push((Rank::Class, path.class().to_string()));
                idx
            }
        };

        let mut current = root_idx;
        for (rank, name) in path.iter().skip(1) {
            current = match self.find_child(current, name) {
                Some(existing) => existing,
                None => {
                    let idx = self.arena.insert(TaxonNode::new(name, rank, Some(current)));
                    if let Some(parent) = self.arena.get_mut(current) {
                        parent.children.push(idx);
                    }
                    debug!("created {} '{}'", rank, name);
                    created.push((rank, name.to_string()));
                    idx
                }
            };
        }

        let species_status = if created.iter().any(|(rank, _)| rank.is_species()) {
            SpeciesStatus::Added
        } else {
            match self.arena.get(current) {
                Some(node)
                    if node.common_name == common_name
                        && node.reference_link == normalize_link(reference_link) =>
                {
                    SpeciesStatus::Unchanged
                }
                _ => SpeciesStatus::Updated,
            }
        };
        if let Some(species) = self.arena.get_mut(current) {
            species.set_annotations(common_name, reference_link);
        }
        info!("species '{}' {:?}", path.species(), species_status);

        Ok(InsertReport {
            root: root_idx,
            species: current,
            created,
            species_status,
        })
    }

    /// Child of `parent` whose name matches `name` case-insensitively.
    pub fn find_child(&self, parent: Index, name: &str) -> Option<Index> {
        self.arena.get(parent)?.children.iter().copied().find(|&child| {
            self.arena
                .get(child)
                .is_some_and(|node| node.name.eq_ignore_ascii_case(name))
        })
    }

    /// First node in pre-order whose taxonomic name, or species common name,
    /// equals `name` ignoring case.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_name(&self, name: &str) -> Option<Index> {
        self.iter_preorder()
            .find(|(_, node)| node.matches(name))
            .map(|(idx, _)| idx)
    }

    /// Overwrite the annotations of a species node.
    ///
    /// An empty `reference_link` clears the link.
    ///
    /// # Errors
    /// * [`DomainError::InvalidTarget`] if `idx` is stale or not a species.
    /// * [`DomainError::Validation`] if `common_name` is empty.
    #[instrument(level = "debug", skip(self))]
    pub fn update_species(
        &mut self,
        idx: Index,
        common_name: &str,
        reference_link: &str,
    ) -> DomainResult<()> {
        let node = self
            .arena
            .get_mut(idx)
            .ok_or_else(|| DomainError::InvalidTarget("node does not exist".to_string()))?;
        if !node.is_species() {
            return Err(DomainError::InvalidTarget(format!(
                "'{}' is a {}, only species can be updated",
                node.name, node.rank
            )));
        }
        let common_name = common_name.trim();
        if common_name.is_empty() {
            return Err(DomainError::Validation(
                "common name cannot be empty".to_string(),
            ));
        }

        node.set_annotations(common_name, reference_link);
        info!("species '{}' updated", node.name);
        Ok(())
    }

    /// Remove the species found by [`find_by_name`](Self::find_by_name).
    ///
    /// Returns the removed node, or `None` when nothing matches or the match is
    /// not a species. Ancestors are kept even when left without children.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_species(&mut self, name: &str) -> Option<TaxonNode> {
        let idx = self.find_by_name(name)?;
        match self.remove_species(idx) {
            Ok(removed) => Some(removed),
            Err(e) => {
                debug!("nothing deleted for '{}': {}", name, e);
                None
            }
        }
    }

    /// Detach a species node from its parent and free it.
    ///
    /// # Errors
    /// * [`DomainError::InvalidTarget`] if `idx` is stale or not a species.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_species(&mut self, idx: Index) -> DomainResult<TaxonNode> {
        match self.arena.get(idx) {
            None => {
                return Err(DomainError::InvalidTarget(
                    "node does not exist".to_string(),
                ))
            }
            Some(node) if !node.is_species() => {
                return Err(DomainError::InvalidTarget(format!(
                    "'{}' is a {}, only species can be deleted",
                    node.name, node.rank
                )))
            }
            Some(_) => {}
        }

        let removed = self
            .arena
            .remove(idx)
            .ok_or_else(|| DomainError::InvalidTarget("node does not exist".to_string()))?;
        if let Some(parent) = removed.parent.and_then(|p| self.arena.get_mut(p)) {
            parent.children.retain(|&child| child != idx);
        }
        info!("species '{}' deleted", removed.name);
        Ok(removed)
    }

    /// Release every node, children before parents. Returns the number released.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) -> usize {
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        for &idx in &order {
            self.arena.remove(idx);
        }
        self.root = None;
        debug!("released {} nodes", order.len());
        order.len()
    }

    /// Number of edges between `idx` and the root.
    pub fn depth_of(&self, idx: Index) -> Option<usize> {
        self.lineage(idx).map(|chain| chain.len() - 1)
    }

    /// Ancestor chain from the root down to and including `idx`.
    pub fn lineage(&self, idx: Index) -> Option<Vec<Index>> {
        let mut chain = vec![idx];
        let mut current = self.arena.get(idx)?;
        while let Some(parent) = current.parent {
            chain.push(parent);
            current = self.arena.get(parent)?;
        }
        chain.reverse();
        Some(chain)
    }
}
