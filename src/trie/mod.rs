//! # AlgebraicTrie
//!
//! A prefix tree whose stored values live in a semiring. Values at the same
//! path are merged with the semiring's `add`, and any subtree can be
//! *contracted* to the semiring sum of everything below it. Viewed as a
//! tensor, the trie is a sparse map from key sequences to values.
//!
//! ```
//! use sparse_semiring::semiring::Standard;
//! use sparse_semiring::trie::AlgebraicTrie;
//!
//! let mut sales = AlgebraicTrie::new(Standard);
//! sales.add(["eu", "fr"], 10.0);
//! sales.add(["eu", "fr"], 5.0);
//! sales.add(["eu", "de"], 7.0);
//! sales.add(["us"], 3.0);
//!
//! assert_eq!(*sales.get(["eu", "fr"]).unwrap(), 15.0);
//! assert_eq!(sales.contract(["eu"]), 22.0);
//! assert_eq!(sales.contract(Vec::<&str>::new()), 25.0);
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::error::AlgebraError;
use crate::semiring::Semiring;
use crate::sparse::SparseKey;

#[derive(Debug, Clone)]
struct Node<K, V> {
    value: Option<V>,
    children: HashMap<K, Node<K, V>>,
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }
}

impl<K: SparseKey, V> Node<K, V> {
    fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    fn descend<Q: Borrow<K>>(&self, path: impl IntoIterator<Item = Q>) -> Option<&Self> {
        path.into_iter().try_fold(self, |node, key| {
            let key: &K = key.borrow();
            node.children.get(key)
        })
    }

    fn descend_or_create(&mut self, path: impl IntoIterator<Item = K>) -> &mut Self {
        path.into_iter()
            .fold(self, |node, key| node.children.entry(key).or_default())
    }

    /// Removes the value at `path` and prunes ancestors left empty.
    fn remove<Q: Borrow<K>>(&mut self, path: &[Q]) -> Option<V> {
        match path.split_first() {
            None => self.value.take(),
            Some((head, rest)) => {
                let head: &K = head.borrow();
                let child = self.children.get_mut(head)?;
                let removed = child.remove(rest)?;
                if child.is_empty() {
                    self.children.remove(head);
                }
                Some(removed)
            }
        }
    }
}

/// Prefix tree of semiring values.
#[derive(Debug, Clone)]
pub struct AlgebraicTrie<K, S: Semiring> {
    semiring: S,
    root: Node<K, S::Value>,
    len: usize,
}

impl<K: SparseKey, S: Semiring + Default> Default for AlgebraicTrie<K, S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<K: SparseKey, S: Semiring> AlgebraicTrie<K, S> {
    pub fn new(semiring: S) -> Self {
        Self {
            semiring,
            root: Node::default(),
            len: 0,
        }
    }

    pub fn semiring(&self) -> &S {
        &self.semiring
    }

    /// Number of paths holding a value.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` at `path`, replacing any previous value.
    pub fn set(&mut self, path: impl IntoIterator<Item = K>, value: S::Value) -> Option<S::Value> {
        let previous = self.root.descend_or_create(path).value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Merges `value` into `path`: `T[path] = T[path] ⊕ value`, starting from zero.
    pub fn add(&mut self, path: impl IntoIterator<Item = K>, value: S::Value) {
        let node = self.root.descend_or_create(path);
        let merged = match node.value.take() {
            Some(current) => self.semiring.add(&current, &value),
            None => {
                self.len += 1;
                self.semiring.add(&self.semiring.zero(), &value)
            }
        };
        node.value = Some(merged);
    }

    /// Value stored exactly at `path`.
    pub fn get<Q: Borrow<K>>(
        &self,
        path: impl IntoIterator<Item = Q>,
    ) -> anyhow::Result<&S::Value> {
        self.root
            .descend(path)
            .and_then(|node| node.value.as_ref())
            .ok_or_else(|| AlgebraError::PathNotFound.into())
    }

    pub fn contains<Q: Borrow<K>>(&self, path: impl IntoIterator<Item = Q>) -> bool {
        self.root
            .descend(path)
            .is_some_and(|node| node.value.is_some())
    }

    /// Removes and returns the value at `path`. Branches left without values
    /// are pruned.
    pub fn delete<Q: Borrow<K>>(
        &mut self,
        path: impl IntoIterator<Item = Q>,
    ) -> anyhow::Result<S::Value> {
        let path: Vec<Q> = path.into_iter().collect();
        let removed = self.root.remove(&path).ok_or(AlgebraError::PathNotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Semiring sum of every value at or below `prefix`; zero if the prefix
    /// does not exist.
    pub fn contract<Q: Borrow<K>>(&self, prefix: impl IntoIterator<Item = Q>) -> S::Value {
        let Some(start) = self.root.descend(prefix) else {
            return self.semiring.zero();
        };
        let mut total = self.semiring.zero();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if let Some(value) = &node.value {
                total = self.semiring.add(&total, value);
            }
            stack.extend(node.children.values());
        }
        total
    }

    /// Depth-first iteration over `(path, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, S::Value> {
        Iter {
            stack: vec![(&self.root, Vec::new())],
        }
    }
}

impl<'a, K: SparseKey, S: Semiring> IntoIterator for &'a AlgebraicTrie<K, S> {
    type Item = (Vec<K>, &'a S::Value);
    type IntoIter = Iter<'a, K, S::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merges every `(path, value)` pair with [`AlgebraicTrie::add`].
impl<K, S, P> Extend<(P, S::Value)> for AlgebraicTrie<K, S>
where
    K: SparseKey,
    S: Semiring,
    P: IntoIterator<Item = K>,
{
    fn extend<T: IntoIterator<Item = (P, S::Value)>>(&mut self, iter: T) {
        for (path, value) in iter {
            self.add(path, value);
        }
    }
}

pub struct Iter<'a, K, V> {
    stack: Vec<(&'a Node<K, V>, Vec<K>)>,
}

impl<'a, K: SparseKey, V> Iterator for Iter<'a, K, V> {
    type Item = (Vec<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.stack.pop() {
            for (key, child) in node.children.iter() {
                let mut child_path = path.clone();
                child_path.push(key.clone());
                self.stack.push((child, child_path));
            }
            if let Some(value) = &node.value {
                return Some((path, value));
            }
        }
        None
    }
}
