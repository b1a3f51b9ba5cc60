use crate::avl_base::{iter::Iter, DefaultAvlTree};

/// Ordered set of `Ord` values backed by an AVL tree. Duplicates are rejected.
#[derive(Clone)]
pub struct AvlSet<T: Ord> {
    _tree: DefaultAvlTree<T>,
}

impl<T: Ord> AvlSet<T> {
    pub fn new() -> Self {
        Self {
            _tree: DefaultAvlTree::ordered(false),
        }
    }

    pub fn is_empty(&self) -> bool {
        self._tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self._tree.len()
    }

    pub fn contains(&self, value: &T) -> bool {
        self._tree.contains(value)
    }

    /// Returns false if an equal value is already present.
    pub fn put(&mut self, value: T) -> bool {
        self._tree.add(value)
    }

    pub fn get(&self, value: &T) -> Option<&T> {
        self._tree.get(value)
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        self._tree.remove(value)
    }

    pub fn first(&self) -> Option<&T> {
        self._tree.first()
    }

    pub fn last(&self) -> Option<&T> {
        self._tree.last()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self._tree.iter()
    }

    pub fn clear(&mut self) {
        self._tree.clear()
    }

    pub fn as_tree(&self) -> &DefaultAvlTree<T> {
        &self._tree
    }
}

impl<T: Ord> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + std::fmt::Debug> std::fmt::Debug for AvlSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self._tree.extend(iter)
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T: Ord> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
