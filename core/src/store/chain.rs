use std::collections::HashMap;

use slab::Slab;

use super::item::Item;

#[derive(Debug)]
struct Node {
    item: Item,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked chain over a slab arena. Links are slab keys, and `index`
/// maps item ids to the key of their node.
///
/// Not synchronized; `OrderedItemStore` wraps it in a mutex.
#[derive(Debug, Default)]
pub(super) struct Chain {
    nodes: Slab<Node>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl Chain {
    pub(super) fn len(&self) -> usize {
        self.index.len()
    }

    pub(super) fn key_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(super) fn get(&self, id: &str) -> Option<&Item> {
        self.key_of(id).map(|key| &self.nodes[key].item)
    }

    pub(super) fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        let key = self.key_of(id)?;
        Some(&mut self.nodes[key].item)
    }

    /// Appends at the tail. The id must not already be present.
    pub(super) fn push_back(&mut self, item: Item) {
        debug_assert!(!self.index.contains_key(&item.id));
        let id = item.id.clone();
        let key = self.nodes.insert(Node {
            item,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.index.insert(id, key);
    }

    pub(super) fn remove(&mut self, id: &str) -> Option<Item> {
        let key = self.index.remove(id)?;
        self.unlink(key);
        Some(self.nodes.remove(key).item)
    }

    /// Moves `key` to sit right after `anchor`. Keys must differ.
    pub(super) fn move_after(&mut self, key: usize, anchor: usize) {
        debug_assert_ne!(key, anchor);
        self.unlink(key);
        let next = self.nodes[anchor].next;
        {
            let node = &mut self.nodes[key];
            node.prev = Some(anchor);
            node.next = next;
        }
        self.nodes[anchor].next = Some(key);
        match next {
            Some(next) => self.nodes[next].prev = Some(key),
            None => self.tail = Some(key),
        }
    }

    /// Moves `key` to sit right before `anchor`. Keys must differ.
    pub(super) fn move_before(&mut self, key: usize, anchor: usize) {
        debug_assert_ne!(key, anchor);
        self.unlink(key);
        let prev = self.nodes[anchor].prev;
        {
            let node = &mut self.nodes[key];
            node.prev = prev;
            node.next = Some(anchor);
        }
        self.nodes[anchor].prev = Some(key);
        match prev {
            Some(prev) => self.nodes[prev].next = Some(key),
            None => self.head = Some(key),
        }
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        std::iter::successors(self.head, move |&key| self.nodes[key].next)
            .map(move |key| &self.nodes[key].item)
    }

    pub(super) fn iter_rev(&self) -> impl Iterator<Item = &Item> + '_ {
        std::iter::successors(self.tail, move |&key| self.nodes[key].prev)
            .map(move |key| &self.nodes[key].item)
    }

    /// Detaches `key` from its neighbours, repairing both directions and the
    /// endpoints. The node stays in the arena.
    fn unlink(&mut self, key: usize) {
        let (prev, next) = {
            let node = &self.nodes[key];
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.nodes[key];
        node.prev = None;
        node.next = None;
    }

    /// Panics unless forward links, backward links, the index and the arena
    /// all describe the same sequence.
    #[cfg(test)]
    pub(super) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.nodes.len(), "index/arena size mismatch");

        let forward: Vec<usize> =
            std::iter::successors(self.head, |&key| self.nodes[key].next).collect();
        let mut backward: Vec<usize> =
            std::iter::successors(self.tail, |&key| self.nodes[key].prev).collect();
        backward.reverse();

        assert_eq!(forward.len(), self.index.len(), "forward walk misses nodes");
        assert_eq!(forward, backward, "backward walk is not the reverse");
        for key in &forward {
            let id = &self.nodes[*key].item.id;
            assert_eq!(self.index.get(id), Some(key), "index entry for '{id}' is stale");
        }
        if let Some(head) = self.head {
            assert_eq!(self.nodes[head].prev, None);
        }
        if let Some(tail) = self.tail {
            assert_eq!(self.nodes[tail].next, None);
        }
    }
}
