pub mod avl_traits;
pub mod avltree;
pub mod error;
pub mod iter;
mod node;
pub mod tree_stats;

use self::{avl_traits::DefaultComparator, avltree::AvlTree};

pub use self::avl_traits::{cmp_ord, cmp_partial, Comparator, TreeFlags};
pub use self::error::{Result, TreeError};

pub type DefaultAvlTree<T> = AvlTree<T, DefaultComparator<T>>;
