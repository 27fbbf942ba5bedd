/*
termtree::Tree lives in another crate, so the conversion is a trait we implement
for the taxonomy tree instead of an inherent method on Tree<String>.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{TaxonNode, TaxonomyTree};

/// Marker appended to species that carry a reference link.
pub const LINK_MARKER: &str = "{W}";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TaxonomyTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &TaxonomyTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get(node_idx) {
                for &child_idx in node.children() {
                    if let Some(child) = tree.get(child_idx) {
                        let mut child_tree = Tree::new(label(child));
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.root().and_then(|idx| self.get(idx).map(|node| (idx, node))) {
            Some((root_idx, root)) => {
                let mut rendered = Tree::new(label(root));
                build_tree(self, root_idx, &mut rendered);
                rendered
            }
            None => Tree::new("(empty)".to_string()),
        }
    }
}

/// One display line: `(Rank) name`, plus `[Common Name]` and the link marker for species.
pub fn label(node: &TaxonNode) -> String {
    let mut line = node.to_string();
    if node.is_species() {
        if !node.common_name().is_empty() {
            line.push_str(&format!(" [{}]", node.common_name()));
        }
        if node.reference_link().is_some() {
            line.push(' ');
            line.push_str(LINK_MARKER);
        }
    }
    line
}

impl TaxonomyTree {
    /// Full-tree rendering with depth-proportional indentation.
    pub fn render(&self) -> String {
        self.to_tree_string().to_string()
    }
}
