pub mod avl_base;
pub mod avl_set;

pub use avl_base::{
    avltree::AvlTree, cmp_ord, cmp_partial, Comparator, DefaultAvlTree, TreeError, TreeFlags,
};
