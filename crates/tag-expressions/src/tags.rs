//! Membership abstraction over the collections an expression is evaluated
//! against.
//!
//! Tags are compared verbatim: no trimming, no case folding, and no implicit
//! `@` prefix.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A collection that can answer whether it holds a given tag.
pub trait TagSet {
    /// Returns `true` when `tag` is present, compared byte for byte.
    fn contains_tag(&self, tag: &str) -> bool;
}

impl<S: BuildHasher> TagSet for HashSet<String, S> {
    fn contains_tag(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl<S: BuildHasher> TagSet for HashSet<&str, S> {
    fn contains_tag(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl TagSet for BTreeSet<String> {
    fn contains_tag(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl TagSet for BTreeSet<&str> {
    fn contains_tag(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl<T: AsRef<str>> TagSet for [T] {
    fn contains_tag(&self, tag: &str) -> bool {
        self.iter().any(|candidate| candidate.as_ref() == tag)
    }
}

impl<T: AsRef<str>, const N: usize> TagSet for [T; N] {
    fn contains_tag(&self, tag: &str) -> bool {
        self.as_slice().contains_tag(tag)
    }
}

impl<T: AsRef<str>> TagSet for Vec<T> {
    fn contains_tag(&self, tag: &str) -> bool {
        self.as_slice().contains_tag(tag)
    }
}

impl<T: TagSet + ?Sized> TagSet for &T {
    fn contains_tag(&self, tag: &str) -> bool {
        (**self).contains_tag(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_sets_match_exact_text() {
        let owned: HashSet<String> = ["@fast".to_string()].into_iter().collect();
        let borrowed: HashSet<&str> = ["@fast"].into_iter().collect();
        assert!(owned.contains_tag("@fast"));
        assert!(borrowed.contains_tag("@fast"));
        assert!(!owned.contains_tag("fast"));
        assert!(!borrowed.contains_tag("@FAST"));
    }

    #[test]
    fn ordered_sets_match_exact_text() {
        let owned: BTreeSet<String> = ["x(1)".to_string()].into_iter().collect();
        let borrowed: BTreeSet<&str> = ["x(1)"].into_iter().collect();
        assert!(owned.contains_tag("x(1)"));
        assert!(borrowed.contains_tag("x(1)"));
        assert!(!owned.contains_tag("x"));
    }

    #[test]
    fn sequences_scan_for_tag() {
        let array = ["a", "b"];
        let vec = vec!["a".to_string()];
        let empty: [&str; 0] = [];
        assert!(array.contains_tag("b"));
        assert!(vec.contains_tag("a"));
        assert!(!empty.contains_tag("a"));
        assert!(array.as_slice().contains_tag("a"));
    }
}
