//! Transitive grouping of similarity edges.

use std::collections::BTreeMap;

use results_model::{DuplicateCluster, DuplicateGroup, SimilarityEdge};
use tracing::debug;

/// Disjoint-set forest with union by size and path compression.
///
/// Keys are interned in insertion order; [`DisjointSet::groups`] reports
/// sets in the order their first member was inserted.
#[derive(Debug, Clone)]
pub struct DisjointSet<K> {
    index: BTreeMap<K, usize>,
    keys: Vec<K>,
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl<K: Ord + Clone> Default for DisjointSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> DisjointSet<K> {
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            keys: Vec::new(),
            parent: Vec::new(),
            size: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Adds `key` as a singleton if unseen. Returns its slot.
    pub fn insert(&mut self, key: K) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }
        let slot = self.keys.len();
        self.index.insert(key.clone(), slot);
        self.keys.push(key);
        self.parent.push(slot);
        self.size.push(1);
        slot
    }

    /// Merges the sets of `a` and `b`, inserting either if unseen.
    /// Returns false when they were already in the same set.
    pub fn union(&mut self, a: K, b: K) -> bool {
        let a = self.insert(a);
        let b = self.insert(b);
        let (mut root_a, mut root_b) = (self.root(a), self.root(b));
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }

    /// Whether `a` and `b` are known and in the same set.
    pub fn same_set(&mut self, a: &K, b: &K) -> bool {
        match (self.index.get(a).copied(), self.index.get(b).copied()) {
            (Some(a), Some(b)) => self.root(a) == self.root(b),
            _ => false,
        }
    }

    /// All sets, each listing members in insertion order.
    pub fn groups(&mut self) -> Vec<Vec<K>> {
        let mut slot_of_root: BTreeMap<usize, usize> = BTreeMap::new();
        let mut groups: Vec<Vec<K>> = Vec::new();
        for slot in 0..self.keys.len() {
            let root = self.root(slot);
            let group = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(self.keys[slot].clone());
        }
        groups
    }

    fn root(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }
}

/// Groups riders linked directly or transitively by `edges`.
///
/// An edge bridging two existing clusters merges them. Every rider id ends
/// up in at most one cluster and singletons are dropped. Clusters come out
/// in the order their first rider appears in `edges`.
pub fn group_duplicates(edges: &[SimilarityEdge]) -> Vec<DuplicateCluster> {
    let mut sets = DisjointSet::new();
    for edge in edges {
        sets.union(edge.rider_a.clone(), edge.rider_b.clone());
    }
    let clusters: Vec<DuplicateCluster> = sets
        .groups()
        .into_iter()
        .filter(|members| members.len() >= 2)
        .map(|members| DuplicateCluster {
            rider_ids: members.into_iter().collect(),
        })
        .collect();
    debug!(
        edges = edges.len(),
        clusters = clusters.len(),
        "grouped duplicates"
    );
    clusters
}

/// Best score and combined reasons of the edges inside each cluster.
pub fn summarize_clusters(
    edges: &[SimilarityEdge],
    clusters: &[DuplicateCluster],
) -> Vec<DuplicateGroup> {
    clusters
        .iter()
        .map(|cluster| {
            let mut similarity: f64 = 0.0;
            let mut reasons = Vec::new();
            for edge in edges
                .iter()
                .filter(|e| cluster.contains(&e.rider_a) && cluster.contains(&e.rider_b))
            {
                similarity = similarity.max(edge.score);
                for reason in &edge.reasons {
                    if !reasons.contains(reason) {
                        reasons.push(*reason);
                    }
                }
            }
            DuplicateGroup {
                rider_ids: cluster.rider_ids.clone(),
                similarity,
                reasons,
            }
        })
        .collect()
}
