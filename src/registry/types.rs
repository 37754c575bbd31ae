//! Core types of the source registry.

use indexmap::IndexMap;

use crate::value::{Getter, Value};

/// A registry node: a callable leaf or a nested namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceNode {
    Leaf(Getter),
    Branch(SourceTree),
}

impl SourceNode {
    pub fn as_getter(&self) -> Option<&Getter> {
        match self {
            SourceNode::Leaf(getter) => Some(getter),
            SourceNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&SourceTree> {
        match self {
            SourceNode::Leaf(_) => None,
            SourceNode::Branch(tree) => Some(tree),
        }
    }
}

/// Nested namespace of named sources. Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTree {
    pub(super) entries: IndexMap<String, SourceNode>,
}

impl SourceTree {
    pub fn new() -> Self {
        SourceTree {
            entries: IndexMap::new(),
        }
    }

    /// Add a leaf, replacing whatever was stored under `name`.
    pub fn insert_getter(&mut self, name: impl Into<String>, getter: Getter) -> &mut Self {
        self.entries.insert(name.into(), SourceNode::Leaf(getter));
        self
    }

    /// Add a leaf built from a closure.
    pub fn insert_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        self.insert_getter(name, Getter::new(f))
    }

    /// Add a nested namespace, replacing whatever was stored under `name`.
    pub fn insert_branch(&mut self, name: impl Into<String>, tree: SourceTree) -> &mut Self {
        self.entries.insert(name.into(), SourceNode::Branch(tree));
        self
    }

    /// Builder form of [`insert_getter`](Self::insert_getter).
    pub fn with_getter(mut self, name: impl Into<String>, getter: Getter) -> Self {
        self.insert_getter(name, getter);
        self
    }

    /// Builder form of [`insert_fn`](Self::insert_fn).
    pub fn with_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        self.insert_fn(name, f);
        self
    }

    /// Builder form of [`insert_branch`](Self::insert_branch).
    pub fn with_branch(mut self, name: impl Into<String>, tree: SourceTree) -> Self {
        self.insert_branch(name, tree);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SourceNode> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, SourceNode> {
        self.entries.iter()
    }

    /// Dot-paths of every leaf, depth first in key order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaf_paths("", &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for (name, node) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match node {
                SourceNode::Leaf(_) => paths.push(path),
                SourceNode::Branch(tree) => tree.collect_leaf_paths(&path, paths),
            }
        }
    }
}

impl<'a> IntoIterator for &'a SourceTree {
    type Item = (&'a String, &'a SourceNode);
    type IntoIter = indexmap::map::Iter<'a, String, SourceNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Exposes the tree as a plain object: leaves become functions, branches
/// become nested objects. Sanitizing the result gives the tree back.
impl From<SourceTree> for Value {
    fn from(tree: SourceTree) -> Self {
        Value::object(tree.entries.into_iter().map(|(name, node)| {
            let value = match node {
                SourceNode::Leaf(getter) => Value::Function(getter),
                SourceNode::Branch(tree) => Value::from(tree),
            };
            (name, value)
        }))
    }
}

impl From<&SourceTree> for Value {
    fn from(tree: &SourceTree) -> Self {
        Value::from(tree.clone())
    }
}
