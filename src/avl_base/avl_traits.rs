use std::{cmp::Ordering, fmt, marker::PhantomData};

use bitmask_enum::bitmask;

// Traits bound
pub trait Comparator<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// Comparator for values with an intrinsic total order.
pub struct DefaultComparator<T> {
    _t: PhantomData<fn(&T, &T)>,
}

impl<T> DefaultComparator<T> {
    pub const fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for DefaultComparator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DefaultComparator<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DefaultComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultComparator")
    }
}

impl<T: Ord> Comparator<T> for DefaultComparator<T> {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Three-way comparison for `Ord` values, usable wherever a comparator
/// closure is expected.
pub fn cmp_ord<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Three-way comparison for `PartialOrd` values such as floats. Values that
/// are neither less nor greater than each other (NaN) compare equal.
pub fn cmp_partial<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Construction-time options of a tree. `Unique` is the empty set:
/// duplicates are rejected and no self verification runs.
#[bitmask(u8)]
pub enum TreeFlags {
    Unique = 0,
    AllowDuplicates = 1,
    SelfVerify = 2,
}

impl TreeFlags {
    pub fn from_duplicates(allow_duplicates: bool) -> Self {
        if allow_duplicates {
            TreeFlags::AllowDuplicates
        } else {
            TreeFlags::Unique
        }
    }

    #[inline]
    pub fn allows_duplicates(&self) -> bool {
        self.contains(TreeFlags::AllowDuplicates)
    }

    #[inline]
    pub fn self_verifies(&self) -> bool {
        self.contains(TreeFlags::SelfVerify)
    }
}

#[cfg(test)]
#[test]
fn test_comparators() {
    assert_eq!(DefaultComparator::<u64>::new().compare(&1, &2), Ordering::Less);
    assert_eq!(cmp_ord(&"b", &"a"), Ordering::Greater);
    assert_eq!(cmp_partial(&1.5, &1.5), Ordering::Equal);
    assert_eq!(cmp_partial(&f64::NAN, &0.0), Ordering::Equal);

    let rev = |a: &i32, b: &i32| b.cmp(a);
    assert_eq!(rev.compare(&1, &2), Ordering::Greater);
}

#[cfg(test)]
#[test]
fn test_tree_flags() {
    assert!(!TreeFlags::from_duplicates(false).allows_duplicates());
    assert!(TreeFlags::from_duplicates(true).allows_duplicates());

    let flags = TreeFlags::AllowDuplicates | TreeFlags::SelfVerify;
    assert!(flags.allows_duplicates());
    assert!(flags.self_verifies());
    assert!(!TreeFlags::Unique.self_verifies());
}
