//! Cyclic round-robin index over path buckets, used by the `PathTree` replace policy to draw
//! replacement candidates fairly across middleboxes.

use std::collections::HashMap;

use crate::path::{Path, PathKind};
use crate::scoring::length_order;
use crate::topology::NodeId;

/// Bucket key: `None` is the single plain-path bucket, `Some(mbox)` buckets by middlebox node.
type BucketKey = Option<NodeId>;

/// Round-robin iterator over path-index buckets.
///
/// For plain paths there is a single bucket (key `None`) holding every path index, sorted by
/// ascending length. For middlebox paths, a path index appears in one bucket per middlebox it
/// traverses. `next()` advances the outer (bucket) cursor by one, then returns the next index
/// from that bucket's own cyclic cursor, producing a fair round-robin across middleboxes.
#[derive(Debug, Clone)]
pub struct PathTree {
    keys: Vec<BucketKey>,
    buckets: HashMap<BucketKey, Vec<usize>>,
    outer_cursor: usize,
    inner_cursors: HashMap<BucketKey, usize>,
}

impl PathTree {
    /// Build a path tree over `paths`.
    pub fn new(paths: &[Path]) -> Self {
        let mut buckets: HashMap<BucketKey, Vec<usize>> = HashMap::new();
        let any_middlebox = paths.iter().any(|p| p.middleboxes().is_some());

        if any_middlebox {
            for (i, p) in paths.iter().enumerate() {
                for &mbox in p.middleboxes().unwrap_or_default() {
                    buckets.entry(Some(mbox)).or_default().push(i);
                }
            }
        } else {
            buckets.insert(None, length_order(paths));
        }

        let mut keys: Vec<BucketKey> = buckets.keys().copied().collect();
        keys.sort_by_key(|k| k.map(|n| n.index()));
        let inner_cursors = keys.iter().map(|&k| (k, 0)).collect();

        Self {
            keys,
            buckets,
            outer_cursor: 0,
            inner_cursors,
        }
    }

    /// Whether any bucket holds at least one path index.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() || self.buckets.values().all(Vec::is_empty)
    }

    /// Advance the outer bucket cursor by one, then return the next path index from that
    /// bucket's cyclic cursor. Returns `None` only if the tree has no buckets at all.
    pub fn next(&mut self) -> Option<usize> {
        if self.keys.is_empty() {
            return None;
        }
        let key = self.keys[self.outer_cursor % self.keys.len()];
        self.outer_cursor = (self.outer_cursor + 1) % self.keys.len();

        let bucket = self.buckets.get(&key)?;
        if bucket.is_empty() {
            return None;
        }
        let cursor = self.inner_cursors.entry(key).or_insert(0);
        let idx = bucket[*cursor % bucket.len()];
        *cursor = (*cursor + 1) % bucket.len();
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::NodeIndex;

    fn n(i: u32) -> NodeId {
        NodeIndex::new(i as usize)
    }

    fn plain(len: usize) -> Path {
        Path::Plain {
            nodes: (0..len as u32).map(n).collect(),
        }
    }

    fn with_mbox(len: usize, mboxes: &[u32]) -> Path {
        Path::WithMiddleboxes {
            nodes: (0..len as u32).map(n).collect(),
            middleboxes: mboxes.iter().copied().map(n).collect(),
        }
    }

    #[test]
    fn plain_paths_use_single_bucket_by_length() {
        let paths = vec![plain(4), plain(2), plain(3)];
        let mut tree = PathTree::new(&paths);
        let drawn: Vec<usize> = (0..6).map(|_| tree.next().unwrap()).collect();
        assert_eq!(drawn, vec![1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn middlebox_paths_round_robin_across_boxes() {
        let paths = vec![with_mbox(3, &[10]), with_mbox(3, &[20]), with_mbox(3, &[10, 20])];
        let mut tree = PathTree::new(&paths);
        let drawn: Vec<usize> = (0..4).map(|_| tree.next().unwrap()).collect();
        // buckets: {10: [0, 2], 20: [1, 2]}, outer cursor alternates bucket 10, bucket 20, ...
        assert_eq!(drawn, vec![0, 1, 2, 2]);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let mut tree = PathTree::new(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.next(), None);
    }
}
