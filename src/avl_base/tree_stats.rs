/// Shape snapshot of a tree, see `AvlTree::stats`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    pub leaves: usize,
    /// Height of the root, -1 for an empty tree.
    pub height: i32,
}

impl TreeStats {
    pub fn inner_nodes(&self) -> usize {
        self.size - self.leaves
    }

    /// Root height relative to the smallest possible height for `size`
    /// nodes. AVL trees stay below roughly 1.44.
    pub fn height_ratio(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        let optimal = (self.size as f64 + 1.0).log2().ceil() - 1.0;
        if optimal <= 0.0 {
            return 1.0;
        }
        self.height as f64 / optimal
    }
}
