//! # Keyed Binary Search Tree
//!
//! An unbalanced binary search tree with exclusively owned child links.
//!
//! ```text
//!                 (m)
//!               /     \
//!            (c)       (t)        left subtree keys  <  node key
//!           /   \         \       right subtree keys >  node key
//!         (a)   (f)       (x)     equal key          => value replaced
//! ```
//!
//! No rebalancing is done: inserting keys in sorted order degenerates into
//! a chain of depth `n`. Insertion, search, traversal and drop are all
//! iterative, so such chains cost time but never stack depth.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Binary search tree mapping ordered keys to values.
pub struct KeyedTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> KeyedTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        KeyedTree { root: None, len: 0 }
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Length of the longest root-to-leaf path (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        deepest
    }

    /// Values in ascending key order (left, node, right).
    ///
    /// Materialized eagerly; calling it again on an unmodified tree yields
    /// the same sequence.
    pub fn inorder(&self) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.len);
        self.walk_inorder(|_, value| out.push(value));
        out
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        self.walk_inorder(|key, value| out.push((key, value)));
        out
    }

    /// Consumes the tree, returning owned values in ascending key order.
    pub fn into_inorder(mut self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node<K, V>>> = Vec::new();
        let mut cur = self.root.take();

        loop {
            while let Some(mut node) = cur {
                cur = node.left.take();
                stack.push(node);
            }

            match stack.pop() {
                Some(node) => {
                    let Node { value, right, .. } = *node;
                    out.push(value);
                    cur = right;
                }
                None => break,
            }
        }

        out
    }

    fn walk_inorder<'a>(&'a self, mut visit: impl FnMut(&'a K, &'a V)) {
        let mut stack: Vec<&'a Node<K, V>> = Vec::new();
        let mut cur = self.root.as_deref();

        loop {
            while let Some(node) = cur {
                stack.push(node);
                cur = node.left.as_deref();
            }

            match stack.pop() {
                Some(node) => {
                    visit(&node.key, &node.value);
                    cur = node.right.as_deref();
                }
                None => break,
            }
        }
    }
}

impl<K: Ord, V> KeyedTree<K, V> {
    /// Inserts `value` under `key`, or overwrites the value already stored
    /// under an equal key. Returns the overwritten value, if any.
    ///
    /// The node structure is never changed for an existing key, so the
    /// ordering invariant holds after every call.
    pub fn insert_or_update(&mut self, key: K, value: V) -> Option<V> {
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            match key.cmp(&node.key) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            }
        }

        *slot = Some(Node::leaf(key, value));
        self.len += 1;
        None
    }

    /// Looks up the value stored under `key`.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root.as_deref();

        while let Some(node) = cur {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }

        None
    }

    /// Returns true if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }
}

impl<K, V> Default for KeyedTree<K, V> {
    fn default() -> Self {
        KeyedTree::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for KeyedTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = KeyedTree::new();
        for (key, value) in iter {
            tree.insert_or_update(key, value);
        }
        tree
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for KeyedTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

// Box's recursive drop would follow a degenerate chain one frame per node.
impl<K, V> Drop for KeyedTree<K, V> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
