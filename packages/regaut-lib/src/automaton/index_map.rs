use std::ops::Index;

use petgraph::graph::NodeIndex;

/// A map from the node indices of one automaton to values, backed by a
/// [`Vec`]. Node indices of a `DiGraph` are compact, so this is cheaper than
/// hashing when most states end up with an entry.
#[derive(Debug, Clone)]
pub struct IndexMap<V> {
    data: Vec<Option<V>>,
}

impl<V> IndexMap<V> {
    pub fn new(max_index: usize) -> Self {
        IndexMap {
            data: std::iter::repeat_with(|| None).take(max_index).collect(),
        }
    }

    pub fn contains_key(&self, key: NodeIndex) -> bool {
        self.data
            .get(key.index())
            .is_some_and(|entry| entry.is_some())
    }

    pub fn get(&self, key: NodeIndex) -> Option<&V> {
        self.data.get(key.index()).and_then(|entry| entry.as_ref())
    }

    /// Inserts a value, growing the map if the key lies past its end.
    /// Returns the previous value.
    pub fn insert(&mut self, key: NodeIndex, value: V) -> Option<V> {
        let index = key.index();
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }

        self.data[index].replace(value)
    }

    pub fn len(&self) -> usize {
        self.data.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &V)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().map(|v| (NodeIndex::new(i), v)))
    }
}

impl<V> Index<NodeIndex> for IndexMap<V> {
    type Output = V;

    fn index(&self, key: NodeIndex) -> &Self::Output {
        self.get(key)
            .unwrap_or_else(|| panic!("No entry for node {:?}", key))
    }
}

/// A set of node indices, backed by a [`Vec`] of flags.
#[derive(Debug, Clone)]
pub struct IndexSet {
    data: Vec<bool>,
}

impl IndexSet {
    pub fn new(max_index: usize) -> Self {
        IndexSet {
            data: vec![false; max_index],
        }
    }

    /// Adds a node to the set. Returns true if it was not present before.
    pub fn insert(&mut self, key: NodeIndex) -> bool {
        let index = key.index();
        if index >= self.data.len() {
            self.data.resize(index + 1, false);
        }

        !std::mem::replace(&mut self.data[index], true)
    }

    pub fn contains(&self, key: NodeIndex) -> bool {
        self.data.get(key.index()).copied().unwrap_or(false)
    }
}
