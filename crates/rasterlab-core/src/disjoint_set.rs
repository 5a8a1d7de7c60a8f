//! Disjoint-set forest (union-find)
//!
//! Labels are small positive integers handed out by [`DisjointSet::make_set`]
//! starting at 1, so 0 can mean "background" in a label raster. Finding a
//! root compresses the path; union attaches the lower-rank root under the
//! higher-rank one and bumps the rank on ties.

/// Union-find over labels `1..=len`.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    // index 0 is a placeholder so labels index directly
    parent: Vec<u32>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Create an empty forest.
    pub fn new() -> Self {
        DisjointSet {
            parent: vec![0],
            rank: vec![0],
        }
    }

    /// Number of labels created so far
    pub fn len(&self) -> usize {
        self.parent.len().saturating_sub(1)
    }

    /// Check whether no label was created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a singleton set and return its label.
    pub fn make_set(&mut self) -> u32 {
        if self.parent.is_empty() {
            self.parent.push(0);
            self.rank.push(0);
        }
        let label = self.parent.len() as u32;
        self.parent.push(label);
        self.rank.push(0);
        label
    }

    /// Root label of the set containing `label`, compressing the path.
    ///
    /// # Panics
    ///
    /// Panics if `label` was not returned by [`DisjointSet::make_set`].
    pub fn find_set(&mut self, label: u32) -> u32 {
        let mut root = label;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = label;
        while cur != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`, returning the new root.
    ///
    /// # Panics
    ///
    /// Panics if either label was not returned by [`DisjointSet::make_set`].
    pub fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find_set(a);
        let rb = self.find_set(b);
        if ra == rb {
            return ra;
        }
        let (rank_a, rank_b) = (self.rank[ra as usize], self.rank[rb as usize]);
        if rank_a < rank_b {
            self.parent[ra as usize] = rb;
            rb
        } else if rank_a > rank_b {
            self.parent[rb as usize] = ra;
            ra
        } else {
            self.parent[rb as usize] = ra;
            self.rank[ra as usize] += 1;
            ra
        }
    }

    /// Rank of a label (an upper bound on its subtree height)
    pub fn rank(&self, label: u32) -> Option<u32> {
        if label == 0 {
            return None;
        }
        self.rank.get(label as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_start_at_one() {
        let mut ds = DisjointSet::new();
        assert!(ds.is_empty());
        assert_eq!(ds.make_set(), 1);
        assert_eq!(ds.make_set(), 2);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_default_behaves_like_new() {
        let mut ds = DisjointSet::default();
        assert_eq!(ds.make_set(), 1);
        assert_eq!(ds.find_set(1), 1);
    }

    #[test]
    fn test_union_by_rank() {
        let mut ds = DisjointSet::new();
        let a = ds.make_set();
        let b = ds.make_set();
        let c = ds.make_set();
        let root = ds.union(a, b);
        assert_eq!(root, a);
        assert_eq!(ds.rank(a), Some(1));
        // lower-rank root goes under the higher-rank one
        assert_eq!(ds.union(c, b), a);
        assert_eq!(ds.rank(a), Some(1));
        assert_eq!(ds.find_set(c), a);
    }

    #[test]
    fn test_find_set_idempotent_after_compression() {
        let mut ds = DisjointSet::new();
        let labels: Vec<u32> = (0..8).map(|_| ds.make_set()).collect();
        for pair in labels.windows(2) {
            ds.union(pair[0], pair[1]);
        }
        let root = ds.find_set(labels[7]);
        for &l in &labels {
            assert_eq!(ds.find_set(l), root);
            let r = ds.find_set(l);
            assert_eq!(ds.find_set(r), root);
        }
    }

    #[test]
    fn test_separate_sets_stay_separate() {
        let mut ds = DisjointSet::new();
        let a = ds.make_set();
        let b = ds.make_set();
        let c = ds.make_set();
        let d = ds.make_set();
        ds.union(a, b);
        ds.union(c, d);
        assert_ne!(ds.find_set(a), ds.find_set(c));
        ds.union(b, d);
        assert_eq!(ds.find_set(a), ds.find_set(c));
    }
}
