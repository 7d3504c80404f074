//! Disjoint-set forest.

/// Disjoint sets over elements `0..n` with union by rank and path compression.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the representative of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Checks whether `a` and `b` belong to the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` if they are already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_find() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(sets.same_set(0, 1));
        assert!(!sets.same_set(1, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 4));
        assert!(sets.same_set(0, 3));
        assert!(!sets.same_set(2, 0));
    }

    #[test]
    fn test_long_chain_is_compressed() {
        let n = 100_000;
        let mut sets = DisjointSet::new(n);
        // link each element directly under the next one to build the deepest possible tree
        for i in 0..n - 1 {
            sets.parent[i] = i + 1;
        }
        assert_eq!(sets.find(0), n - 1);
        assert!(sets.parent.iter().all(|parent| *parent == n - 1));
    }
}
