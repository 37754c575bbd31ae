//! Source getter: a registry bundled with the operations that maintain it.
//!
//! ## Lifecycle
//!
//! ```text
//! SourceGetter::with_builtins(window)   // or ::new(initial sources)
//!      ↓
//! add_sources / remove_sources / set_sources   (sanitized, in place)
//!      ↓
//! get_value(request)                     // resolve against current tree
//! ```
//!
//! Every input that can add sources goes through [`sanitize`] first, so the
//! tree only ever holds getters and namespaces.
//!
//! ## Example
//!
//! ```
//! use value_source::registry::{SourceGetter, SourceTree, ValueRequest};
//! use value_source::value::Value;
//!
//! let mut getter = SourceGetter::new(SourceTree::new().with_fn("aaa", |_| Value::from("bbb")));
//! getter.add_sources(Value::object(vec![
//!     ("nested", Value::object(vec![("ccc", Value::function(|args| args[0].clone()))])),
//!     ("ignored", Value::from("not a function")),
//! ]));
//!
//! assert_eq!(getter.get_value(&ValueRequest::new("aaa")), Value::from("bbb"));
//! assert_eq!(
//!     getter.get_value(&ValueRequest::new("nested.ccc").with_parameters("x")),
//!     Value::from("x")
//! );
//! assert!(getter.get_sources().lookup("ignored").is_none());
//! ```

use tracing::debug;

use super::config::ValuesConfig;
use super::resolver::{resolve, ValueRequest};
use super::sanitize;
use super::types::SourceTree;
use crate::host::Window;
use crate::path::SourcePaths;
use crate::sources;
use crate::value::Value;

/// Owns one source tree. Not shared: two getters built from the same input
/// hold independent trees (the getters inside are shared).
pub struct SourceGetter {
    sources: SourceTree,
}

impl SourceGetter {
    /// Start from `sources`, sanitized. A non-object yields an empty tree.
    pub fn new(sources: impl Into<Value>) -> Self {
        SourceGetter {
            sources: sanitize(&sources.into()),
        }
    }

    /// Start from the built-in sources reading `window`.
    pub fn with_builtins(window: Window) -> Self {
        SourceGetter {
            sources: sources::builtin(&window),
        }
    }

    /// Currently registered sources.
    pub fn get_sources(&self) -> &SourceTree {
        &self.sources
    }

    /// Replace all sources with the sanitized `sources`.
    pub fn set_sources(&mut self, sources: impl Into<Value>) -> &SourceTree {
        self.sources = sanitize(&sources.into());
        &self.sources
    }

    /// Merge the sanitized `sources` over the current ones.
    pub fn add_sources(&mut self, sources: impl Into<Value>) -> &SourceTree {
        let sanitized = sanitize(&sources.into());
        self.sources.merge(sanitized);
        &self.sources
    }

    /// Remove the sources at the given path(s). Emptied namespaces remain.
    pub fn remove_sources(&mut self, paths: impl Into<SourcePaths>) -> &SourceTree {
        for path in &paths.into() {
            if self.sources.remove(path).is_none() {
                debug!(path = %path, "no source to remove");
            }
        }
        &self.sources
    }

    /// Resolve `request` against the current sources.
    pub fn get_value(&self, request: &ValueRequest) -> Value {
        resolve(&self.sources, request)
    }

    /// Drop the sources a configuration disables.
    pub fn apply_config(&mut self, config: &ValuesConfig) -> &SourceTree {
        self.remove_sources(config.sources.disabled.clone())
    }

    /// Resolve the configured value called `name`; `None` if the
    /// configuration does not define it.
    pub fn get_named_value(&self, config: &ValuesConfig, name: &str) -> Option<Value> {
        config.values.get(name).map(|request| self.get_value(request))
    }
}

impl From<SourceTree> for SourceGetter {
    fn from(sources: SourceTree) -> Self {
        SourceGetter { sources }
    }
}

/// An empty registry. The built-in sources read a host, so they come from
/// [`SourceGetter::with_builtins`] instead.
impl Default for SourceGetter {
    fn default() -> Self {
        SourceGetter {
            sources: SourceTree::new(),
        }
    }
}
