//! Destination conflict detection.
//!
//! Works over batch indices, not paths: each conflicting index points at the
//! index that caused it, and causes are followed to their root with path
//! compression so the final map is flat (every value is a root).
//!
//! A destination conflicts when it
//! - equals an earlier destination exactly, or
//! - lies below another destination of the batch (nearest ancestor wins),
//!
//! and transitively when its cause is itself in conflict.
//!
//! Precondition: destinations are already resolved (see `resolve_path`);
//! unresolved spellings of the same location produce false negatives.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Flat parent table over `0..n`; `parent[i] == i` marks a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CauseTable {
    parent: Vec<usize>,
}

impl CauseTable {
    /// Every index starts as its own root.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    /// Record that `index` was caused by `cause`.
    pub fn link(&mut self, index: usize, cause: usize) {
        debug_assert_ne!(index, cause, "an index cannot be its own cause");
        self.parent[index] = cause;
    }

    /// True while `index` has no recorded cause of its own.
    pub fn is_root(&self, index: usize) -> bool {
        self.parent[index] == index
    }

    /// Follow causes to the root and point every visited index straight at it.
    pub fn root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = index;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }
}

/// Conflicting index -> root-cause index. Roots never appear as keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictMap {
    causes: BTreeMap<usize, usize>,
}

impl ConflictMap {
    pub fn cause_of(&self, index: usize) -> Option<usize> {
        self.causes.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.causes.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.causes.iter().map(|(&k, &v)| (k, v))
    }
}

/// Find every destination that collides with another one and its root cause.
pub fn find_conflicting_paths<P: AsRef<Path>>(paths: &[P]) -> ConflictMap {
    let mut table = CauseTable::new(paths.len());
    let mut first_seen: HashMap<&Path, usize> = HashMap::with_capacity(paths.len());
    let mut marked: BTreeSet<usize> = BTreeSet::new();

    // Exact duplicates point at the first occurrence.
    for (i, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        match first_seen.get(path) {
            Some(&first) => {
                table.link(i, first);
                marked.insert(i);
            }
            None => {
                first_seen.insert(path, i);
            }
        }
    }

    // Destinations below another destination point at the nearest such ancestor.
    for (i, path) in paths.iter().enumerate() {
        if marked.contains(&i) {
            continue;
        }
        let cause = path
            .as_ref()
            .ancestors()
            .skip(1)
            .find_map(|ancestor| first_seen.get(ancestor).copied());
        if let Some(cause) = cause {
            table.link(i, cause);
            marked.insert(i);
        }
    }

    // Flatten once, eagerly, over every index that took part in a link.
    let mut causes = BTreeMap::new();
    let involved: BTreeSet<usize> = marked
        .iter()
        .flat_map(|&i| [i, table.parent[i]])
        .collect();
    for index in involved {
        if table.is_root(index) {
            continue;
        }
        let root = table.root(index);
        causes.insert(index, root);
    }
    ConflictMap { causes }
}
