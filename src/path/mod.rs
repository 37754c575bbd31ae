//! Dot-paths: `.`-separated addresses into a source tree or an object.

use std::fmt;

use pest::Parser;
use pest_derive::Parser;

use crate::error::PathError;

#[derive(Parser)]
#[grammar = "path/dot_path.pest"] // relative to src
struct DotPathParser;

/// A parsed dot-path. The empty path has no segments and addresses the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath {
    segments: Vec<String>,
}

impl DotPath {
    pub fn parse(input: &str) -> Result<DotPath, PathError> {
        let pairs = DotPathParser::parse(Rule::path, input).map_err(|e| PathError::Syntax {
            path: input.to_string(),
            message: e.variant.message().to_string(),
        })?;
        let segments = pairs
            .flatten()
            .filter(|pair| pair.as_rule() == Rule::segment)
            .map(|pair| pair.as_str().to_string())
            .collect();
        Ok(DotPath { segments })
    }

    pub fn root() -> DotPath {
        DotPath { segments: vec![] }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the parent path and the last segment. `None` for the root.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.segments
            .split_last()
            .map(|(last, parent)| (parent, last.as_str()))
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// One or more dot-paths, tried or removed in order. A single path converts
/// into a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePaths(Vec<String>);

impl SourcePaths {
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SourcePaths {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<&str> for SourcePaths {
    fn from(path: &str) -> Self {
        SourcePaths(vec![path.to_string()])
    }
}

impl From<String> for SourcePaths {
    fn from(path: String) -> Self {
        SourcePaths(vec![path])
    }
}

impl From<&String> for SourcePaths {
    fn from(path: &String) -> Self {
        SourcePaths(vec![path.clone()])
    }
}

impl From<Vec<String>> for SourcePaths {
    fn from(paths: Vec<String>) -> Self {
        SourcePaths(paths)
    }
}

impl From<Vec<&str>> for SourcePaths {
    fn from(paths: Vec<&str>) -> Self {
        SourcePaths(paths.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for SourcePaths {
    fn from(paths: &[&str]) -> Self {
        SourcePaths(paths.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SourcePaths {
    fn from(paths: [&str; N]) -> Self {
        SourcePaths(paths.iter().map(|p| p.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let path = DotPath::parse("custom").unwrap();
        assert_eq!(path.segments(), &["custom".to_string()]);
    }

    #[test]
    fn test_parse_nested() {
        let path = DotPath::parse("environment.frame_id").unwrap();
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.split_last(), Some((&path.segments()[..1], "frame_id")));
        assert_eq!(path.to_string(), "environment.frame_id");
    }

    #[test]
    fn test_empty_path_is_root() {
        let path = DotPath::parse("").unwrap();
        assert!(path.is_root());
        assert_eq!(path, DotPath::root());
        assert_eq!(path.split_last(), None);
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        assert!(DotPath::parse("a..b").is_err());
        assert!(DotPath::parse(".a").is_err());
        assert!(DotPath::parse("a.").is_err());
        assert!(DotPath::parse(".").is_err());
    }

    #[test]
    fn test_segments_keep_other_characters() {
        let path = DotPath::parse("a b.c-d.$e").unwrap();
        assert_eq!(path.segments(), &["a b".to_string(), "c-d".to_string(), "$e".to_string()]);
    }

    #[test]
    fn test_source_paths_from_scalar_and_list() {
        assert_eq!(SourcePaths::from("a").into_vec(), vec!["a".to_string()]);
        assert_eq!(SourcePaths::from(["a", "b"]).len(), 2);
        assert!(SourcePaths::from(Vec::<String>::new()).is_empty());
    }
}
