//! Ordered, immutable id sequences for the selection and hover sets.

use crate::id::NodeId;
use std::sync::Arc;

/// An ordered sequence of node ids in hit order.
///
/// Values are never mutated in place; every change builds a new set, so a
/// consumer holding a clone keeps a consistent snapshot. Not deduplicated:
/// order matters and the *last* element is the primary one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeSet(Arc<[NodeId]>);

impl NodeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The most recently hit id: the one that gets dragged or highlighted.
    pub fn primary(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    /// A new set without `id`, preserving order.
    pub fn without(&self, id: NodeId) -> Self {
        self.iter().filter(|&other| other != id).collect()
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[NodeId]> for NodeSet {
    fn from(ids: &[NodeId]) -> Self {
        Self(Arc::from(ids))
    }
}

impl From<Vec<NodeId>> for NodeSet {
    fn from(ids: Vec<NodeId>) -> Self {
        Self(Arc::from(ids))
    }
}

impl PartialEq<[NodeId]> for NodeSet {
    fn eq(&self, other: &[NodeId]) -> bool {
        *self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_is_last_element() {
        let a = NodeId::intern("sel_a");
        let b = NodeId::intern("sel_b");
        let set = NodeSet::from(vec![a, b]);
        assert_eq!(set.primary(), Some(b));
        assert_eq!(NodeSet::empty().primary(), None);
    }

    #[test]
    fn replacement_does_not_alias() {
        let a = NodeId::intern("sel_a");
        let b = NodeId::intern("sel_b");
        let original = NodeSet::from(vec![a, b]);
        let snapshot = original.clone();
        let trimmed = original.without(b);

        assert_eq!(snapshot.as_slice(), &[a, b]);
        assert_eq!(trimmed.as_slice(), &[a]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let a = NodeId::intern("sel_a");
        let b = NodeId::intern("sel_b");
        let set: NodeSet = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.primary(), Some(a));
    }
}
