use std::{cmp::Ordering, mem};

use super::avl_traits::Comparator;

pub type Link<T> = Option<Box<Node<T>>>;

/// Height of a missing child.
pub const ABSENT_HEIGHT: i32 = -1;

#[derive(Clone, Debug)]
pub struct Node<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
    pub height: i32,
}

#[inline]
pub fn link_height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(ABSENT_HEIGHT, |n| n.height)
}

impl<T> Node<T> {
    pub fn new_leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 0,
        })
    }

    #[inline]
    pub fn compute_height(&mut self) {
        self.height = 1 + link_height(&self.left).max(link_height(&self.right));
    }

    #[inline]
    pub fn balance_factor(&self) -> i32 {
        link_height(&self.left) - link_height(&self.right)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Calls `f` on every value of the subtree in ascending order.
    pub fn inorder<'a, F: FnMut(&'a T)>(&'a self, f: &mut F) {
        if let Some(left) = &self.left {
            left.inorder(f);
        }
        f(&self.value);
        if let Some(right) = &self.right {
            right.inorder(f);
        }
    }
}

/// Rotations. Each one returns the new subtree root with the heights of all
/// touched nodes recomputed. A rotation whose pivot child is missing leaves
/// the subtree as it is.
impl<T> Node<T> {
    pub fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.left.take() else {
            return self;
        };
        log::debug!("Node::rotate_right at {:p}", self);

        self.left = new_root.right.take();
        self.compute_height();
        new_root.right = Some(self);
        new_root.compute_height();

        new_root
    }

    pub fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.right.take() else {
            return self;
        };
        log::debug!("Node::rotate_left at {:p}", self);

        self.right = new_root.left.take();
        self.compute_height();
        new_root.left = Some(self);
        new_root.compute_height();

        new_root
    }

    /// The left child's right child becomes the subtree root; its left
    /// subtree moves under the old left child, its right subtree under the
    /// old root.
    pub fn rotate_left_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut child) = self.left.take() else {
            return self;
        };
        let Some(mut new_root) = child.right.take() else {
            self.left = Some(child);
            return self;
        };
        log::debug!("Node::rotate_left_right at {:p}", self);

        child.right = new_root.left.take();
        self.left = new_root.right.take();
        child.compute_height();
        self.compute_height();
        new_root.left = Some(child);
        new_root.right = Some(self);
        new_root.compute_height();

        new_root
    }

    pub fn rotate_right_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut child) = self.right.take() else {
            return self;
        };
        let Some(mut new_root) = child.left.take() else {
            self.right = Some(child);
            return self;
        };
        log::debug!("Node::rotate_right_left at {:p}", self);

        child.left = new_root.right.take();
        self.right = new_root.left.take();
        child.compute_height();
        self.compute_height();
        new_root.left = Some(self);
        new_root.right = Some(child);
        new_root.compute_height();

        new_root
    }

    /// Rebalance after the left subtree lost a level. The right sibling's own
    /// balance picks the rotation.
    fn rebalance_after_left_removal(self: Box<Self>) -> Box<Self> {
        let mut root = if self.balance_factor() == -2 {
            let sibling = self.right.as_deref().map_or(0, Node::balance_factor);
            if sibling <= 0 {
                self.rotate_left()
            } else {
                self.rotate_right_left()
            }
        } else {
            self
        };
        root.compute_height();
        root
    }

    fn rebalance_after_right_removal(self: Box<Self>) -> Box<Self> {
        let mut root = if self.balance_factor() == 2 {
            let sibling = self.left.as_deref().map_or(0, Node::balance_factor);
            if sibling >= 0 {
                self.rotate_right()
            } else {
                self.rotate_left_right()
            }
        } else {
            self
        };
        root.compute_height();
        root
    }
}

/// Insertion
impl<T> Node<T> {
    /// Inserts `value` below this node and returns the new subtree root and
    /// whether a node was created.
    pub fn insert<C>(
        self: Box<Self>,
        value: T,
        allow_duplicates: bool,
        cmp: &C,
    ) -> (Box<Self>, bool)
    where
        C: Comparator<T> + ?Sized,
    {
        let (root, inserted, _) = self.insert_descend(value, allow_duplicates, cmp);
        (root, inserted)
    }

    /// Also returns how `value` compared against this node, which is the side
    /// it was sent to. The parent uses it to choose between a single and a
    /// double rotation.
    fn insert_descend<C>(
        mut self: Box<Self>,
        value: T,
        allow_duplicates: bool,
        cmp: &C,
    ) -> (Box<Self>, bool, Ordering)
    where
        C: Comparator<T> + ?Sized,
    {
        let ord = cmp.compare(&value, &self.value);
        if !allow_duplicates && ord == Ordering::Equal {
            return (self, false, ord);
        }

        let inserted;
        if ord != Ordering::Greater {
            let (left, added, side) =
                Self::insert_into(self.left.take(), value, allow_duplicates, cmp);
            self.left = Some(left);
            inserted = added;

            if self.balance_factor() == 2 {
                self = if side != Ordering::Greater {
                    self.rotate_right()
                } else {
                    self.rotate_left_right()
                };
            }
        } else {
            let (right, added, side) =
                Self::insert_into(self.right.take(), value, allow_duplicates, cmp);
            self.right = Some(right);
            inserted = added;

            if self.balance_factor() == -2 {
                self = if side == Ordering::Greater {
                    self.rotate_left()
                } else {
                    self.rotate_right_left()
                };
            }
        }

        self.compute_height();
        (self, inserted, ord)
    }

    fn insert_into<C>(
        slot: Link<T>,
        value: T,
        allow_duplicates: bool,
        cmp: &C,
    ) -> (Box<Self>, bool, Ordering)
    where
        C: Comparator<T> + ?Sized,
    {
        match slot {
            Some(child) => child.insert_descend(value, allow_duplicates, cmp),
            None => (Node::new_leaf(value), true, Ordering::Equal),
        }
    }
}

/// Deletion
impl<T> Node<T> {
    /// Removes one value comparing equal to `value` from this subtree. Returns
    /// the new subtree root (absent when the subtree became empty) and the
    /// removed value. When nothing matches the subtree is untouched.
    pub fn remove<C>(mut self: Box<Self>, value: &T, cmp: &C) -> (Link<T>, Option<T>)
    where
        C: Comparator<T> + ?Sized,
    {
        match cmp.compare(value, &self.value) {
            Ordering::Less => {
                let Some(left) = self.left.take() else {
                    return (Some(self), None);
                };
                let (left, removed) = left.remove(value, cmp);
                self.left = left;
                if removed.is_none() {
                    return (Some(self), None);
                }
                (Some(self.rebalance_after_left_removal()), removed)
            }
            Ordering::Greater => {
                let Some(right) = self.right.take() else {
                    return (Some(self), None);
                };
                let (right, removed) = right.remove(value, cmp);
                self.right = right;
                if removed.is_none() {
                    return (Some(self), None);
                }
                (Some(self.rebalance_after_right_removal()), removed)
            }
            Ordering::Equal => {
                let Some(left) = self.left.take() else {
                    let node = *self;
                    return (node.right, Some(node.value));
                };
                log::debug!("Node::remove splicing predecessor into {:p}", self);

                let (left, predecessor) = left.remove_max();
                self.left = left;
                let removed = mem::replace(&mut self.value, predecessor);
                (Some(self.rebalance_after_left_removal()), Some(removed))
            }
        }
    }

    /// Detaches the right-most node of this subtree, promoting its left
    /// subtree into its slot, and returns its value.
    fn remove_max(mut self: Box<Self>) -> (Link<T>, T) {
        match self.right.take() {
            None => {
                let node = *self;
                (node.left, node.value)
            }
            Some(right) => {
                let (right, max) = right.remove_max();
                self.right = right;
                (Some(self.rebalance_after_right_removal()), max)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl_base::avl_traits::cmp_ord;

    fn node(value: i32, left: Link<i32>, right: Link<i32>) -> Link<i32> {
        let mut n = Box::new(Node {
            value,
            left,
            right,
            height: 0,
        });
        n.compute_height();
        Some(n)
    }

    fn leaf(value: i32) -> Link<i32> {
        node(value, None, None)
    }

    fn shape(link: &Link<i32>) -> String {
        match link {
            None => ".".to_string(),
            Some(n) if n.is_leaf() => n.value.to_string(),
            Some(n) => format!("({} {} {})", shape(&n.left), n.value, shape(&n.right)),
        }
    }

    fn insert_all(values: &[i32], allow_duplicates: bool) -> Link<i32> {
        let mut root: Link<i32> = None;
        for &v in values {
            root = Some(match root.take() {
                Some(r) => r.insert(v, allow_duplicates, &cmp_ord::<i32>).0,
                None => Node::new_leaf(v),
            });
        }
        root
    }

    #[test]
    fn heights_of_absent_children() {
        let n = Node::new_leaf(1);
        assert_eq!(n.height, 0);
        assert_eq!(n.balance_factor(), 0);
        assert_eq!(link_height::<i32>(&None), ABSENT_HEIGHT);

        let root = node(2, leaf(1), None).unwrap();
        assert_eq!(root.height, 1);
        assert_eq!(root.balance_factor(), 1);
    }

    #[test]
    fn single_rotations() {
        let root = node(3, node(2, leaf(1), None), None).unwrap();
        assert_eq!(root.balance_factor(), 2);
        let root = Some(root.rotate_right());
        assert_eq!(shape(&root), "(1 2 3)");
        assert_eq!(root.as_ref().unwrap().height, 1);

        let root = node(1, None, node(2, None, leaf(3))).unwrap();
        let root = Some(root.rotate_left());
        assert_eq!(shape(&root), "(1 2 3)");
        assert_eq!(root.as_ref().unwrap().height, 1);
    }

    #[test]
    fn double_rotations_redistribute_grandchildren() {
        let root = node(5, node(2, leaf(1), node(4, leaf(3), None)), leaf(6)).unwrap();
        assert_eq!(root.balance_factor(), 2);
        let root = Some(root.rotate_left_right());
        assert_eq!(shape(&root), "((1 2 3) 4 (. 5 6))");
        assert_eq!(root.as_ref().unwrap().height, 2);

        let root = node(2, leaf(1), node(5, node(3, None, leaf(4)), leaf(6))).unwrap();
        let root = Some(root.rotate_right_left());
        assert_eq!(shape(&root), "((1 2 .) 3 (4 5 6))");
        assert_eq!(root.as_ref().unwrap().height, 2);
    }

    #[test]
    fn rotation_without_pivot_is_noop() {
        let root = node(1, None, None).unwrap();
        let root = Some(root.rotate_right());
        assert_eq!(shape(&root), "1");

        let root = node(2, leaf(1), None).unwrap();
        let root = Some(root.rotate_left_right());
        assert_eq!(shape(&root), "(1 2 .)");
    }

    #[test]
    fn insert_picks_rotation_by_landing_side() {
        assert_eq!(shape(&insert_all(&[1, 2, 3], false)), "(1 2 3)");
        assert_eq!(shape(&insert_all(&[3, 2, 1], false)), "(1 2 3)");
        assert_eq!(shape(&insert_all(&[3, 1, 2], false)), "(1 2 3)");
        assert_eq!(shape(&insert_all(&[1, 3, 2], false)), "(1 2 3)");
    }

    #[test]
    fn insert_duplicates_go_left() {
        let root = insert_all(&[2, 2, 2], true);
        assert_eq!(shape(&root), "(2 2 2)");

        let root = insert_all(&[2], false).unwrap();
        let (root, inserted) = root.insert(2, false, &cmp_ord::<i32>);
        assert!(!inserted);
        assert!(root.is_leaf());
    }

    #[test]
    fn remove_with_balanced_sibling_rotates_once() {
        let root = node(2, leaf(1), node(4, leaf(3), leaf(5))).unwrap();
        let (root, removed) = root.remove(&1, &cmp_ord::<i32>);
        assert_eq!(removed, Some(1));
        assert_eq!(shape(&root), "((. 2 3) 4 5)");
        assert_eq!(root.as_ref().unwrap().height, 2);
    }

    #[test]
    fn remove_with_inner_heavy_sibling_rotates_twice() {
        let root = node(2, leaf(1), node(4, leaf(3), None)).unwrap();
        let (root, removed) = root.remove(&1, &cmp_ord::<i32>);
        assert_eq!(removed, Some(1));
        assert_eq!(shape(&root), "(2 3 4)");
    }

    #[test]
    fn remove_splices_predecessor() {
        let root = node(4, node(2, leaf(1), leaf(3)), leaf(5)).unwrap();
        let (root, removed) = root.remove(&4, &cmp_ord::<i32>);
        assert_eq!(removed, Some(4));
        assert_eq!(shape(&root), "((1 2 .) 3 5)");

        let root = node(4, node(2, leaf(1), None), leaf(5)).unwrap();
        let (root, _) = root.remove(&4, &cmp_ord::<i32>);
        assert_eq!(shape(&root), "(1 2 5)");
    }

    #[test]
    fn remove_missing_value_keeps_shape() {
        let root = insert_all(&[4, 2, 6, 1, 3, 5, 7], false);
        let before = shape(&root);
        let (root, removed) = root.unwrap().remove(&8, &cmp_ord::<i32>);
        assert_eq!(removed, None);
        assert_eq!(shape(&root), before);
    }

    #[test]
    fn clone_copies_values_and_heights() {
        let root = insert_all(&[5, 3, 8, 1, 4], false).unwrap();
        let copy = root.clone();
        assert_eq!(shape(&Some(copy.clone())), shape(&Some(root.clone())));
        assert_eq!(copy.height, root.height);
        assert!(!std::ptr::eq(&*copy, &*root));

        let mut values = Vec::new();
        copy.inorder(&mut |v| values.push(*v));
        assert_eq!(values, vec![1, 3, 4, 5, 8]);
    }
}
