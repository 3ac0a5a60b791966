#![allow(dead_code)]

pub mod fuzzer;

use std::collections::BTreeSet;

use threaded_avl::AvlSet;

/// Forward cursor walk from `begin()` to `end()`.
pub fn walk_forward(set: &AvlSet<i64>) -> Vec<i64> {
    let mut out = Vec::with_capacity(set.len());
    let mut c = set.begin();
    while c != set.end() {
        out.push(*c.value().unwrap());
        c.advance();
    }
    out
}

/// Reverse cursor walk from `rbegin()` to `rend()`.
pub fn walk_backward(set: &AvlSet<i64>) -> Vec<i64> {
    let mut out = Vec::with_capacity(set.len());
    let mut c = set.rbegin();
    while c != set.rend() {
        out.push(*c.value().unwrap());
        c.retreat();
    }
    out
}

/// Worst-case AVL height for `n` elements.
pub fn height_bound(n: usize) -> f64 {
    1.45 * ((n + 2) as f64).log2() - 1.0
}

/// Checks a set against a reference model after a mutation.
pub fn assert_matches_model(set: &AvlSet<i64>, model: &BTreeSet<i64>) {
    set.assert_valid().unwrap();
    assert_eq!(set.len(), model.len());
    let expected: Vec<i64> = model.iter().copied().collect();
    assert_eq!(walk_forward(set), expected);
    let mut reversed = expected;
    reversed.reverse();
    assert_eq!(walk_backward(set), reversed);
    assert!(f64::from(set.height()) <= height_bound(set.len()));
}
