//! Source registry and resolution.
//!
//! A registry is a [`SourceTree`]: named getters ([`SourceNode::Leaf`])
//! grouped into nested namespaces ([`SourceNode::Branch`]), addressed by
//! dot-paths such as `environment.frame_id`.
//!
//! ## Resolution
//!
//! A [`ValueRequest`] names one or more candidate paths. They are tried in
//! order and the first getter returning something other than
//! `Undefined`/`Null` wins:
//!
//! ```text
//! source: ["custom1", "custom2", "missing"]
//!      ↓
//! 1. custom1 → getter returns Null      → keep looking
//! 2. custom2 → getter returns "aaa"     → found
//! 3. missing → not inspected
//!      ↓
//! "aaa"  (or the request's default when nothing is found)
//! ```
//!
//! Branches are never called, so naming a namespace instead of a getter is
//! the same as naming nothing.
//!
//! ## Example
//!
//! ```
//! use value_source::registry::{resolve, SourceTree, ValueRequest};
//! use value_source::value::Value;
//!
//! let sources = SourceTree::new()
//!     .with_fn("custom1", |_| Value::Null)
//!     .with_fn("custom2", |_| Value::from("aaa"));
//!
//! let request = ValueRequest::new(["custom1", "custom2"]);
//! assert_eq!(resolve(&sources, &request), Value::from("aaa"));
//!
//! let request = ValueRequest::new("xxx").with_default("fallback");
//! assert_eq!(resolve(&sources, &request), Value::from("fallback"));
//! ```

pub mod config;
pub mod resolver;
pub mod source_getter;
pub mod types;

use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;

use crate::path::DotPath;
use crate::value::{ObjectRef, Value};

pub use config::ValuesConfig;
pub use resolver::{resolve, ValueRequest};
pub use source_getter::SourceGetter;
pub use types::{SourceNode, SourceTree};

/// Copy the function and object entries of `input` into a new tree,
/// recursively. Everything else is dropped, and a non-object input yields
/// an empty tree.
pub fn sanitize(input: &Value) -> SourceTree {
    match input {
        Value::Object(object) => {
            let mut visiting = HashSet::new();
            sanitize_object(object, &mut visiting)
        }
        _ => SourceTree::new(),
    }
}

// `visiting` holds the objects on the current path; an object that contains
// itself is cut off at the repeat.
fn sanitize_object(object: &ObjectRef, visiting: &mut HashSet<*const ()>) -> SourceTree {
    let id = Rc::as_ptr(object) as *const ();
    let mut result = SourceTree::new();
    if !visiting.insert(id) {
        return result;
    }
    for (key, value) in object.borrow().iter() {
        match value {
            Value::Function(getter) => {
                result.insert_getter(key.clone(), getter.clone());
            }
            Value::Object(nested) => {
                let tree = sanitize_object(nested, visiting);
                result.insert_branch(key.clone(), tree);
            }
            other => debug!(key = %key, kind = other.type_name(), "dropping non-source entry"),
        }
    }
    visiting.remove(&id);
    result
}

impl SourceTree {
    /// Overlay `other` onto this tree. Leaves of `other` replace whatever
    /// sits at the same name; branches merge recursively, creating the
    /// branch here when missing and replacing a leaf that was in the way.
    /// Names present only here are kept.
    pub fn merge(&mut self, other: SourceTree) -> &mut Self {
        for (name, node) in other.entries {
            match node {
                SourceNode::Leaf(getter) => {
                    self.entries.insert(name, SourceNode::Leaf(getter));
                }
                SourceNode::Branch(overlay) => {
                    let slot = self
                        .entries
                        .entry(name)
                        .or_insert_with(|| SourceNode::Branch(SourceTree::new()));
                    if let SourceNode::Leaf(_) = slot {
                        *slot = SourceNode::Branch(SourceTree::new());
                    }
                    if let SourceNode::Branch(base) = slot {
                        base.merge(overlay);
                    }
                }
            }
        }
        self
    }

    /// Node at `path`. `None` when a segment is missing, when the path runs
    /// through a leaf, for the empty (root) path, and for paths that do not
    /// parse.
    pub fn lookup(&self, path: &str) -> Option<&SourceNode> {
        match DotPath::parse(path) {
            Ok(path) => self.lookup_path(&path),
            Err(e) => {
                debug!(error = %e, "source path not found");
                None
            }
        }
    }

    pub fn lookup_path(&self, path: &DotPath) -> Option<&SourceNode> {
        let (last, parents) = path.segments().split_last()?;
        let mut tree = self;
        for segment in parents {
            tree = tree.get(segment)?.as_branch()?;
        }
        tree.get(last)
    }

    /// Delete the node at `path` and return it. Branches left empty by the
    /// removal stay in place.
    pub fn remove(&mut self, path: &str) -> Option<SourceNode> {
        let path = match DotPath::parse(path) {
            Ok(path) => path,
            Err(e) => {
                debug!(error = %e, "nothing to remove");
                return None;
            }
        };
        let (parents, last) = path.split_last()?;
        let mut tree = self;
        for segment in parents {
            tree = match tree.entries.get_mut(segment.as_str())? {
                SourceNode::Branch(nested) => nested,
                SourceNode::Leaf(_) => return None,
            };
        }
        tree.entries.shift_remove(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Getter;

    fn getter() -> Getter {
        Getter::new(|_| Value::Null)
    }

    #[test]
    fn test_lookup_walks_branches() {
        let fn_b = getter();
        let tree =
            SourceTree::new().with_branch("a", SourceTree::new().with_getter("b", fn_b.clone()));
        assert_eq!(tree.lookup("a.b").and_then(SourceNode::as_getter), Some(&fn_b));
        assert!(tree.lookup("a").unwrap().as_branch().is_some());
        assert!(tree.lookup("a.c").is_none());
        assert!(tree.lookup("a.b.c").is_none());
        assert!(tree.lookup("").is_none());
        assert!(tree.lookup("a..b").is_none());
    }

    #[test]
    fn test_remove_through_leaf_is_noop() {
        let mut tree = SourceTree::new().with_getter("a", getter());
        assert!(tree.remove("a.b").is_none());
        assert!(tree.contains("a"));
        assert!(tree.remove("").is_none());
    }

    #[test]
    fn test_sanitize_cuts_cycles() {
        let root = Value::empty_object();
        root.set("me", root.clone());
        root.set("fn", Value::function(|_| Value::Null));
        let tree = sanitize(&root);
        assert!(tree.lookup("fn").is_some());
        assert!(tree.lookup("me").unwrap().as_branch().unwrap().is_empty());
    }

    #[test]
    fn test_merge_replaces_leaf_with_branch() {
        let fn_c = getter();
        let mut base = SourceTree::new().with_getter("a", getter());
        base.merge(
            SourceTree::new().with_branch("a", SourceTree::new().with_getter("c", fn_c.clone())),
        );
        assert_eq!(base.lookup("a.c").and_then(SourceNode::as_getter), Some(&fn_c));
    }
}
