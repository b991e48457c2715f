use crate::NodeId;

/// Dense table keyed by [`NodeId`], growing on demand.
///
/// Node ids are arena indices, so a `Vec` slot per node beats hashing.
#[derive(Debug, Clone)]
pub struct NodeMap<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for NodeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<NodeId> for NodeMap<T> {
    type Output = T;
    fn index(&self, n: NodeId) -> &T {
        match self.get(n) {
            Some(t) => t,
            None => panic!("Node not in map: {:?}", n),
        }
    }
}

impl<T> NodeMap<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
        }
    }

    fn grow_to(&mut self, n: NodeId) {
        if n.0 >= self.slots.len() {
            self.slots.resize_with(n.0 + 1, || None);
        }
    }

    /// Insert `t` for `n`, returning the previous value if any.
    pub fn insert(&mut self, n: NodeId, t: T) -> Option<T> {
        self.grow_to(n);
        self.slots[n.0].replace(t)
    }

    pub fn has(&self, n: NodeId) -> bool {
        matches!(self.slots.get(n.0), Some(Some(_)))
    }

    pub fn get(&self, n: NodeId) -> Option<&T> {
        self.slots.get(n.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, n: NodeId) -> Option<&mut T> {
        self.slots.get_mut(n.0).and_then(Option::as_mut)
    }

    pub fn get_or_insert_with(&mut self, n: NodeId, f: impl FnOnce() -> T) -> &mut T {
        self.grow_to(n);
        self.slots[n.0].get_or_insert_with(f)
    }

    pub fn remove(&mut self, n: NodeId) -> Option<T> {
        self.slots.get_mut(n.0).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of nodes with an entry.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|t| (NodeId(i), t)))
    }
}

#[cfg(test)]
mod test {
    use crate::{NodeId, NodeMap};

    #[test]
    fn empty() {
        let map: NodeMap<f32> = NodeMap::with_capacity(30);
        for i in 0..10 {
            assert!(!map.has(NodeId(i)));
            assert!(map.get(NodeId(i)).is_none());
        }
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn insert_sparse() {
        let mut map = NodeMap::new();
        assert_eq!(map.insert(NodeId(9), 1.5), None);
        assert_eq!(map[NodeId(9)], 1.5);
        for i in 0..9 {
            assert!(!map.has(NodeId(i)));
        }
        assert_eq!(map.insert(NodeId(9), 2.5), Some(1.5));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_insert() {
        let mut map = NodeMap::new();
        *map.get_or_insert_with(NodeId(2), || 0) += 3;
        *map.get_or_insert_with(NodeId(2), || 100) += 1;
        assert_eq!(map[NodeId(2)], 4);
    }

    #[test]
    fn remove_and_iter() {
        let mut map = NodeMap::new();
        for i in 0..6 {
            if i % 2 == 0 {
                map.insert(NodeId(i), i);
            }
        }
        assert_eq!(map.remove(NodeId(2)), Some(2));
        assert_eq!(map.remove(NodeId(3)), None);
        assert_eq!(map.remove(NodeId(60)), None);
        let entries: Vec<(NodeId, usize)> = map.iter().map(|(n, v)| (n, *v)).collect();
        assert_eq!(entries, vec![(NodeId(0), 0), (NodeId(4), 4)]);

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    #[should_panic(expected = "Node not in map")]
    fn index_missing_panics() {
        let map: NodeMap<u8> = NodeMap::new();
        let _ = map[NodeId(0)];
    }
}
