//! CSS selector subset used by [`MemoryDocument`](super::memory::MemoryDocument).
//!
//! Selectors are parsed once into a [`SelectorList`] and matched against any
//! [`HostElement`] tree, walking in document order.

use pest_consume::{match_nodes, Error, Parser};

use super::{Element, HostElement};
use crate::error::SelectorError;

type Result<T> = std::result::Result<T, Error<Rule>>;
type Node<'i> = pest_consume::Node<'i, Rule, ()>;

#[derive(Parser)]
#[grammar = "host/selector.pest"] // relative to src
struct SelectorParser;

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Optional tag plus simple selectors, all of which must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    tag: Option<String>,
    parts: Vec<SimpleSelector>,
}

/// `compounds[i]` and `compounds[i + 1]` are joined by `combinators[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<ComplexSelector>);

#[pest_consume::parser]
impl SelectorParser {
    #[allow(non_snake_case)]
    fn EOI(_input: Node) -> Result<()> {
        Ok(())
    }

    fn ident(input: Node) -> Result<String> {
        Ok(input.as_str().to_string())
    }

    fn inner_dq(input: Node) -> Result<String> {
        Ok(input.as_str().to_string())
    }

    fn inner_sq(input: Node) -> Result<String> {
        Ok(input.as_str().to_string())
    }

    fn universal(_input: Node) -> Result<()> {
        Ok(())
    }

    fn type_sel(input: Node) -> Result<String> {
        Ok(match_nodes!(input.into_children();
            [ident(name)] => name.to_ascii_lowercase(),
        ))
    }

    fn id_sel(input: Node) -> Result<SimpleSelector> {
        Ok(match_nodes!(input.into_children();
            [ident(id)] => SimpleSelector::Id(id),
        ))
    }

    fn class_sel(input: Node) -> Result<SimpleSelector> {
        Ok(match_nodes!(input.into_children();
            [ident(class)] => SimpleSelector::Class(class),
        ))
    }

    fn attr_sel(input: Node) -> Result<SimpleSelector> {
        Ok(match_nodes!(input.into_children();
            [ident(name)] => SimpleSelector::Attribute { name, value: None },
            [ident(name), ident(value)] => SimpleSelector::Attribute { name, value: Some(value) },
            [ident(name), inner_dq(value)] => {
                SimpleSelector::Attribute { name, value: Some(value) }
            },
            [ident(name), inner_sq(value)] => {
                SimpleSelector::Attribute { name, value: Some(value) }
            },
        ))
    }

    fn simple(input: Node) -> Result<SimpleSelector> {
        Ok(match_nodes!(input.into_children();
            [id_sel(s)] => s,
            [class_sel(s)] => s,
            [attr_sel(s)] => s,
        ))
    }

    fn compound(input: Node) -> Result<CompoundSelector> {
        Ok(match_nodes!(input.into_children();
            [universal(_), simple(parts)..] => {
                CompoundSelector { tag: None, parts: parts.collect() }
            },
            [type_sel(tag), simple(parts)..] => {
                CompoundSelector { tag: Some(tag), parts: parts.collect() }
            },
            [simple(parts)..] => CompoundSelector { tag: None, parts: parts.collect() },
        ))
    }

    fn child(_input: Node) -> Result<Combinator> {
        Ok(Combinator::Child)
    }

    fn descendant(_input: Node) -> Result<Combinator> {
        Ok(Combinator::Descendant)
    }

    fn step(input: Node) -> Result<(Combinator, CompoundSelector)> {
        Ok(match_nodes!(input.into_children();
            [child(c), compound(next)] => (c, next),
            [descendant(c), compound(next)] => (c, next),
        ))
    }

    fn complex(input: Node) -> Result<ComplexSelector> {
        Ok(match_nodes!(input.into_children();
            [compound(first), step(steps)..] => {
                let mut compounds = vec![first];
                let mut combinators = vec![];
                for (combinator, next) in steps {
                    combinators.push(combinator);
                    compounds.push(next);
                }
                ComplexSelector { compounds, combinators }
            },
        ))
    }

    fn list(input: Node) -> Result<Vec<ComplexSelector>> {
        Ok(match_nodes!(input.into_children();
            [complex(items)..] => items.collect(),
        ))
    }

    fn selectors(input: Node) -> Result<SelectorList> {
        Ok(match_nodes!(input.into_children();
            [list(items), EOI(_)] => SelectorList(items),
        ))
    }
}

impl SelectorList {
    pub fn parse(selector: &str) -> std::result::Result<SelectorList, SelectorError> {
        let to_error = |e: Error<Rule>| SelectorError::Syntax {
            selector: selector.to_string(),
            message: e.variant.message().to_string(),
        };
        let nodes = SelectorParser::parse(Rule::selectors, selector).map_err(to_error)?;
        let node = nodes.single().map_err(to_error)?;
        SelectorParser::selectors(node).map_err(to_error)
    }

    /// Whether `element`, located under `ancestors` (outermost first),
    /// matches any selector of the list.
    pub fn matches(&self, element: &Element, ancestors: &[Element]) -> bool {
        self.0.iter().any(|complex| complex.matches(element, ancestors))
    }

    /// First element in document order under (and including) `root`.
    pub fn first_match(&self, root: &Element) -> Option<Element> {
        let mut ancestors = Vec::new();
        self.first_match_in(root, &mut ancestors)
    }

    fn first_match_in(&self, element: &Element, ancestors: &mut Vec<Element>) -> Option<Element> {
        if self.matches(element, ancestors) {
            return Some(element.clone());
        }
        ancestors.push(element.clone());
        let found = element
            .children()
            .iter()
            .find_map(|child| self.first_match_in(child, ancestors));
        ancestors.pop();
        found
    }
}

impl ComplexSelector {
    fn matches(&self, element: &Element, ancestors: &[Element]) -> bool {
        self.matches_at(self.compounds.len() - 1, element, ancestors)
    }

    // Right to left: `idx` is the compound that must match `element`.
    fn matches_at(&self, idx: usize, element: &Element, ancestors: &[Element]) -> bool {
        if !self.compounds[idx].matches(element.as_ref()) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => match ancestors.split_last() {
                Some((parent, rest)) => self.matches_at(idx - 1, parent, rest),
                None => false,
            },
            Combinator::Descendant => (0..ancestors.len())
                .rev()
                .any(|i| self.matches_at(idx - 1, &ancestors[i], &ancestors[..i])),
        }
    }
}

impl CompoundSelector {
    fn matches(&self, element: &dyn HostElement) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.parts.iter().all(|part| match part {
            SimpleSelector::Id(id) => element.attribute("id").as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => element
                .attribute("class")
                .map_or(false, |classes| classes.split_whitespace().any(|c| c == class)),
            SimpleSelector::Attribute { name, value } => match (element.attribute(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => &actual == expected,
                (None, _) => false,
            },
        })
    }
}
