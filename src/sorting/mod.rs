//! Deterministic method ordering.
//!
//! The comparator is a fixed chain of keys. Disabling a key in
//! [`SortCriteria`] drops it from the chain, so comparison falls through to
//! the next enabled key. The sort itself is stable, which keeps equal
//! methods in declaration order even when the final tie-break is disabled.

use crate::config::SortCriteria;
use crate::core::MethodRecord;
use std::cmp::Ordering;

/// Read-only projection of a [`MethodRecord`] used for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<'a> {
    pub receiver_type: &'a str,
    pub is_exported: bool,
    pub max_depth: usize,
    pub in_degree: usize,
    pub original_order: usize,
}

impl<'a> From<&'a MethodRecord> for SortKey<'a> {
    fn from(method: &'a MethodRecord) -> Self {
        Self {
            receiver_type: &method.receiver_type,
            is_exported: method.is_exported,
            max_depth: method.max_depth,
            in_degree: method.in_degree,
            original_order: method.original_order,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodComparator {
    criteria: SortCriteria,
}

impl MethodComparator {
    pub fn new(criteria: SortCriteria) -> Self {
        Self { criteria }
    }

    pub fn compare_keys(&self, a: &SortKey, b: &SortKey) -> Ordering {
        let c = &self.criteria;
        let by = |enabled: bool, ord: Ordering| if enabled { ord } else { Ordering::Equal };

        // Receiver names compare as raw bytes, not locale-aware.
        by(
            c.group_by_receiver,
            a.receiver_type.as_bytes().cmp(b.receiver_type.as_bytes()),
        )
        .then(by(c.exported_first, b.is_exported.cmp(&a.is_exported)))
        .then(by(c.sort_by_depth, a.max_depth.cmp(&b.max_depth)))
        .then(by(c.sort_by_in_degree, a.in_degree.cmp(&b.in_degree)))
        .then(by(
            c.preserve_original_order,
            a.original_order.cmp(&b.original_order),
        ))
    }

    pub fn compare(&self, a: &MethodRecord, b: &MethodRecord) -> Ordering {
        self.compare_keys(&SortKey::from(a), &SortKey::from(b))
    }
}

/// Sort methods in place with a stable sort.
pub fn sort_methods(methods: &mut [MethodRecord], criteria: SortCriteria) {
    let comparator = MethodComparator::new(criteria);
    methods.sort_by(|a, b| comparator.compare(a, b));
}

/// True when `sorted` is not the identity permutation of declaration order.
pub fn has_order_changed(sorted: &[MethodRecord]) -> bool {
    sorted
        .iter()
        .enumerate()
        .any(|(position, method)| method.original_order != position)
}
