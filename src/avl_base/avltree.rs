use std::{cmp::Ordering, fmt, sync::Arc};

use super::{
    avl_traits::{Comparator, DefaultComparator, TreeFlags},
    error::{Result, TreeError},
    iter::{IntoIter, Iter},
    node::{link_height, Link, Node},
    tree_stats::TreeStats,
};

/// Height-balanced ordered container. Values are compared directly with the
/// comparator given at construction; with `TreeFlags::AllowDuplicates` it
/// behaves as an ordered multiset.
///
/// Mutation needs `&mut self`, so a tree can only be changed by one owner at
/// a time and never while an `Iter` borrows it.
pub struct AvlTree<T, C> {
    root: Link<T>,
    key_cmp: Arc<C>,
    flags: TreeFlags,
    size: usize,
}

/// Construction
impl<T, C: Comparator<T>> AvlTree<T, C> {
    pub fn new(cmp: C, allow_duplicates: bool) -> Self {
        Self::with_flags(cmp, TreeFlags::from_duplicates(allow_duplicates))
    }

    pub fn with_flags(cmp: C, flags: TreeFlags) -> Self {
        Self {
            root: None,
            key_cmp: Arc::new(cmp),
            flags,
            size: 0,
        }
    }

    /// Fails with `TreeError::MissingComparator` when no comparator is given.
    pub fn try_new(cmp: Option<C>, allow_duplicates: bool) -> Result<Self> {
        let cmp = cmp.ok_or(TreeError::MissingComparator)?;
        Ok(Self::new(cmp, allow_duplicates))
    }

    /// Builds a tree by adding every value of `values` in order.
    pub fn build<I>(cmp: C, flags: TreeFlags, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::with_flags(cmp, flags);
        tree.extend(values);
        tree
    }
}

impl<T: Ord> AvlTree<T, DefaultComparator<T>> {
    /// Tree ordered by `T`'s own `Ord` implementation.
    pub fn ordered(allow_duplicates: bool) -> Self {
        Self::new(DefaultComparator::new(), allow_duplicates)
    }
}

impl<T, C> AvlTree<T, C> {
    // access functions to the item count and configuration
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root; a single node has height 0, an empty tree -1.
    pub fn height(&self) -> i32 {
        link_height(&self.root)
    }

    pub fn flags(&self) -> TreeFlags {
        self.flags
    }

    pub fn allows_duplicates(&self) -> bool {
        self.flags.allows_duplicates()
    }

    pub fn comparator(&self) -> &C {
        &self.key_cmp
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    pub fn stats(&self) -> TreeStats {
        let mut leaves = 0;
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(n) = stack.pop() {
            if n.is_leaf() {
                leaves += 1;
            }
            stack.extend(n.left.as_deref());
            stack.extend(n.right.as_deref());
        }

        TreeStats {
            size: self.size,
            leaves,
            height: self.height(),
        }
    }
}

/// Traversal
impl<T, C> AvlTree<T, C> {
    /// Lazy ascending traversal. Every call starts a fresh, independent walk.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.size)
    }

    /// Applies `f` to every value in ascending order.
    pub fn each<F: FnMut(&T)>(&self, mut f: F) {
        if let Some(root) = &self.root {
            root.inorder(&mut f);
        }
    }

    /// Ascending snapshot of all values.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }
}

/// Access functions querying the tree by descending from the root
impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Returns the first stored value comparing equal to `value` on the
    /// search path. It may be a different value than `value` itself.
    pub fn get(&self, value: &T) -> Option<&T> {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match self.key_cmp.compare(value, &n.value) {
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Greater => node = n.right.as_deref(),
                Ordering::Equal => return Some(&n.value),
            }
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Every stored value comparing equal to `value`, in ascending order.
    pub fn get_all(&self, value: &T) -> Vec<&T> {
        self.iter()
            .skip_while(|v| self.key_cmp.compare(v, value) == Ordering::Less)
            .take_while(|v| self.key_cmp.compare(v, value) == Ordering::Equal)
            .collect()
    }
}

/// Insert and erase
impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Returns true if the value was stored. With duplicates disallowed a
    /// value equal to a stored one is rejected.
    pub fn add(&mut self, value: T) -> bool {
        log::debug!("AvlTree::add on tree size {}", self.size);

        let inserted = match self.root.take() {
            None => {
                self.root = Some(Node::new_leaf(value));
                true
            }
            Some(root) => {
                let (root, inserted) =
                    root.insert(value, self.flags.allows_duplicates(), self.key_cmp.as_ref());
                self.root = Some(root);
                inserted
            }
        };

        if inserted {
            self.size += 1;
        } else {
            log::debug!("AvlTree::add rejected a duplicate");
        }
        self.self_verify();

        inserted
    }

    /// Removes one value equal to `value`, the first found in search order,
    /// and returns it.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        log::debug!("AvlTree::remove on tree size {}", self.size);

        let root = self.root.take()?;
        let (root, removed) = root.remove(value, self.key_cmp.as_ref());
        self.root = root;

        if removed.is_some() {
            self.size -= 1;
        } else {
            log::debug!("AvlTree::remove could not find the value");
        }
        self.self_verify();

        removed
    }

    /// Same as `remove`, reporting only whether anything was removed.
    pub fn delete(&mut self, value: &T) -> bool {
        self.remove(value).is_some()
    }
}

/// Verification
impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Checks the cached heights, the balance of every node, the ascending
    /// order of the values and the tracked size.
    pub fn verify(&self) -> Result<()> {
        let counted = Self::verify_node(&self.root, 0)?;
        if counted != self.size {
            return Err(TreeError::SizeMismatch {
                counted,
                tracked: self.size,
            });
        }

        let mut prev: Option<&T> = None;
        for (position, value) in self.iter().enumerate() {
            if let Some(prev) = prev {
                if self.key_cmp.compare(prev, value) == Ordering::Greater {
                    return Err(TreeError::OutOfOrder { position });
                }
            }
            prev = Some(value);
        }

        Ok(())
    }

    fn verify_node(link: &Link<T>, depth: usize) -> Result<usize> {
        let Some(n) = link else {
            return Ok(0);
        };
        let counted =
            Self::verify_node(&n.left, depth + 1)? + Self::verify_node(&n.right, depth + 1)?;

        let actual = 1 + link_height(&n.left).max(link_height(&n.right));
        if n.height != actual {
            return Err(TreeError::HeightMismatch {
                depth,
                cached: n.height,
                actual,
            });
        }

        let balance = n.balance_factor();
        if !(-1..=1).contains(&balance) {
            return Err(TreeError::Unbalanced { depth, balance });
        }

        Ok(counted + 1)
    }

    fn self_verify(&self) {
        if !self.flags.self_verifies() {
            return;
        }
        if let Err(err) = self.verify() {
            log::error!("AvlTree::self_verify failed: {}", err);
            debug_assert!(false, "AvlTree::self_verify failed: {}", err);
        }
    }
}

impl<T: Clone, C> Clone for AvlTree<T, C> {
    /// Deep copy of every node. The comparator is shared with the original.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            key_cmp: Arc::clone(&self.key_cmp),
            flags: self.flags,
            size: self.size,
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for AvlTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// Collects into a multiset ordered by a default-constructed comparator.
impl<T, C: Comparator<T> + Default> FromIterator<T> for AvlTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(C::default(), TreeFlags::AllowDuplicates, iter)
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for AvlTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.size)
    }
}

/// Debug
impl<T: fmt::Debug, C> AvlTree<T, C> {
    fn print_node(
        f: &mut fmt::Formatter<'_>,
        node: &Node<T>,
        depth: usize,
        side: &str,
    ) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(f, "{}{:?} height {}", side, node.value, node.height)?;

        if let Some(left) = &node.left {
            Self::print_node(f, left, depth + 1, "L ")?;
        }
        if let Some(right) = &node.right {
            Self::print_node(f, right, depth + 1, "R ")?;
        }

        Ok(())
    }
}

/// Display
impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AvlTree size {} height {}", self.size, self.height())?;
        if let Some(root) = &self.root {
            Self::print_node(f, root, 0, "")?;
        }

        Ok(())
    }
}
