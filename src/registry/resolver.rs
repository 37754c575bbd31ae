//! First-non-null resolution over a source tree.

use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};

use super::types::{SourceNode, SourceTree};
use crate::path::SourcePaths;
use crate::value::Value;

/// What to resolve: candidate paths, the arguments every candidate is
/// called with, and the value to fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRequest {
    pub source: SourcePaths,
    pub parameters: Vec<Value>,
    pub default_value: Value,
}

impl ValueRequest {
    pub fn new(source: impl Into<SourcePaths>) -> Self {
        ValueRequest {
            source: source.into(),
            parameters: Vec::new(),
            default_value: Value::Null,
        }
    }

    /// Arguments for the getters. An array is used as the argument list,
    /// anything else becomes a single argument.
    pub fn with_parameters(mut self, parameters: impl Into<Value>) -> Self {
        self.parameters = parameters.into().into_arguments();
        self
    }

    pub fn with_default(mut self, default_value: impl Into<Value>) -> Self {
        self.default_value = default_value.into();
        self
    }
}

/// Try each path of `request` in order and return the first existing value
/// a getter produces, or the request's default.
///
/// Missing paths, paths naming a branch and getters returning
/// `Undefined`/`Null` all count as "not found". Once a value is found no
/// further getter is called.
pub fn resolve(sources: &SourceTree, request: &ValueRequest) -> Value {
    let found = request.source.iter().fold(Value::Null, |prev, path| {
        if prev.exists() {
            return prev;
        }
        match sources.lookup(path) {
            Some(SourceNode::Leaf(getter)) => {
                trace!(path = %path, "calling source");
                getter.call(&request.parameters)
            }
            Some(SourceNode::Branch(_)) => {
                debug!(path = %path, "source is a namespace, skipping");
                prev
            }
            None => {
                debug!(path = %path, "source not found");
                prev
            }
        }
    });

    if found.exists() {
        found
    } else {
        request.default_value.clone()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    source: Option<OneOrMany>,
    #[serde(default)]
    parameters: Option<toml::Value>,
    #[serde(default)]
    default_value: Option<toml::Value>,
}

impl<'de> Deserialize<'de> for ValueRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawRequest::deserialize(deserializer)?;
        let source = match raw.source {
            Some(OneOrMany::One(path)) => SourcePaths::from(path),
            Some(OneOrMany::Many(paths)) => SourcePaths::from(paths),
            None => SourcePaths::default(),
        };
        let parameters = raw
            .parameters
            .map(|p| Value::from(p).into_arguments())
            .unwrap_or_default();
        let default_value = raw.default_value.map(Value::from).unwrap_or(Value::Null);
        Ok(ValueRequest {
            source,
            parameters,
            default_value,
        })
    }
}
