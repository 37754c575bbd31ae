//! Host snapshots described in TOML, loaded into the in-memory host.
//!
//! ```toml
//! url = "https://shop.example/checkout"
//! name = "checkout"
//!
//! [globals]
//! app = { version = "2.1" }
//!
//! [[elements]]
//! tag = "input"
//! id = "email"
//! attributes = { type = "email" }
//! value = "someone@example.com"
//!
//! # Windows above the current one, top first. Each `frame` is the element
//! # that embeds the next window down.
//! [[parents]]
//! url = "https://shop.example/"
//! focused = true
//! frame = { tag = "iframe", id = "checkout-frame" }
//! ```

use std::fs;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Deserialize;

use super::memory::{MemoryElement, MemoryWindow};
use crate::error::ConfigError;
use crate::value::Value;

fn default_url() -> String {
    "about:blank".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostFixture {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub globals: toml::Table,
    #[serde(default)]
    pub elements: Vec<ElementFixture>,
    #[serde(default)]
    pub parents: Vec<ParentFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementFixture {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    pub text: Option<String>,
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub children: Vec<ElementFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentFixture {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub focused: bool,
    pub frame: Option<ElementFixture>,
}

/// The windows built from a fixture. `top` owns the frame tree; keep it
/// alive for as long as `window` is used.
pub struct FixtureHost {
    pub top: Rc<MemoryWindow>,
    pub window: Rc<MemoryWindow>,
}

impl HostFixture {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn build(&self) -> Result<FixtureHost, ConfigError> {
        let window = MemoryWindow::new(&self.url);
        window.set_name(&self.name);
        window.set_focus(self.focused);
        for (name, value) in &self.globals {
            window.set_global(name, Value::from(value.clone()));
        }
        for element in &self.elements {
            window.dom().body().append_child(element.build()?);
        }

        let mut top = window.clone();
        let mut child = window.clone();
        for parent in self.parents.iter().rev() {
            let parent_window = MemoryWindow::new(&parent.url);
            parent_window.set_name(&parent.name);
            parent_window.set_focus(parent.focused);
            let frame = parent.frame.as_ref().map(ElementFixture::build).transpose()?;
            MemoryWindow::attach_frame(&parent_window, &child, frame);
            top = parent_window.clone();
            child = parent_window;
        }

        Ok(FixtureHost { top, window })
    }
}

impl ElementFixture {
    pub fn build(&self) -> Result<Rc<MemoryElement>, ConfigError> {
        if self.tag.trim().is_empty() {
            return Err(ConfigError::Fixture("element without a tag".to_string()));
        }
        let mut element = MemoryElement::new(self.tag.trim());
        if let Some(id) = &self.id {
            element = element.with_id(id);
        }
        if let Some(class) = &self.class {
            element = element.with_class(class);
        }
        for (name, value) in &self.attributes {
            element = element.with_attribute(name, value);
        }
        if let Some(text) = &self.text {
            element = element.with_text(text);
        }
        if let Some(value) = &self.value {
            element = element.with_value(value);
        }
        element = element.with_checked(self.checked).with_selected(self.selected);
        for child in &self.children {
            element = element.with_child(child.build()?);
        }
        Ok(element.into_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{depth, HostWindow};

    const FIXTURE: &str = r#"
url = "https://shop.example/checkout"
name = "checkout"

[globals]
app = { version = "2.1" }

[[elements]]
tag = "form"
id = "order"

[[elements.children]]
tag = "input"
id = "email"
attributes = { type = "email" }
value = "someone@example.com"

[[parents]]
url = "https://shop.example/"
focused = true

[[parents]]
url = "https://shop.example/frame"
frame = { tag = "iframe", id = "checkout-frame" }
"#;

    #[test]
    fn test_build_fixture() {
        let fixture = HostFixture::parse(FIXTURE).unwrap();
        let host = fixture.build().unwrap();
        let window = host.window.as_window();

        assert_eq!(window.location(), "https://shop.example/checkout");
        assert_eq!(window.name(), "checkout");
        assert_eq!(depth(&window), 2);
        assert_eq!(host.top.location(), "https://shop.example/");
        assert!(host.top.has_focus());
        assert_eq!(
            window.frame_element().unwrap().attribute("id").as_deref(),
            Some("checkout-frame")
        );
        assert_eq!(
            window.global().get_nested(&["app", "version"]),
            Some(Value::from("2.1"))
        );
        let email = window.document().query_selector("#order > #email").unwrap();
        assert_eq!(email.value(), "someone@example.com");
    }

    #[test]
    fn test_empty_fixture_defaults() {
        let host = HostFixture::parse("").unwrap().build().unwrap();
        assert_eq!(host.window.location(), "about:blank");
        assert!(host.window.parent().is_none());
    }

    #[test]
    fn test_element_without_tag() {
        let fixture = HostFixture::parse("[[elements]]\ntag = ' '\n").unwrap();
        assert!(matches!(fixture.build(), Err(ConfigError::Fixture(_))));
    }
}
