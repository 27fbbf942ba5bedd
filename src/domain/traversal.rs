//! Pre-order, post-order and level-order walks over a [`TaxonomyTree`].

use std::collections::VecDeque;
use std::fmt;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{TaxonNode, TaxonomyTree};

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Node, then children left to right
    PreOrder,
    /// Children left to right, then node
    PostOrder,
    /// Breadth first, left to right within a level
    LevelOrder,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Traversal::PreOrder => "pre-order",
            Traversal::PostOrder => "post-order",
            Traversal::LevelOrder => "level-order",
        };
        f.write_str(label)
    }
}

impl TaxonomyTree {
    #[instrument(level = "trace", skip(self))]
    pub fn iter_preorder(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_levelorder(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    /// Walk the tree in the given order. An empty tree yields nothing.
    pub fn traverse(&self, order: Traversal) -> Traverse<'_> {
        match order {
            Traversal::PreOrder => Traverse::Pre(self.iter_preorder()),
            Traversal::PostOrder => Traverse::Post(self.iter_postorder()),
            Traversal::LevelOrder => Traverse::Level(self.iter_levelorder()),
        }
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a TaxonomyTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a TaxonomyTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TaxonNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children().iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a TaxonomyTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a TaxonomyTree) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TaxonNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children().iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

pub struct LevelOrderIterator<'a> {
    tree: &'a TaxonomyTree,
    queue: VecDeque<Index>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a TaxonomyTree) -> Self {
        Self {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a TaxonNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.get(current_idx) {
                self.queue.extend(node.children().iter().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Iterator returned by [`TaxonomyTree::traverse`].
pub enum Traverse<'a> {
    Pre(PreOrderIterator<'a>),
    Post(PostOrderIterator<'a>),
    Level(LevelOrderIterator<'a>),
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (Index, &'a TaxonNode);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traverse::Pre(it) => it.next(),
            Traverse::Post(it) => it.next(),
            Traverse::Level(it) => it.next(),
        }
    }
}
