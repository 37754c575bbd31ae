//! In-memory host: a small element tree, a document and a frame tree of
//! windows. Form state, window names, focus and globals can be changed after
//! construction so tests can drive the sources the way a page would.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::debug;
use uuid::Uuid;

use super::selector::SelectorList;
use super::{Element, HostDocument, HostElement, HostWindow, Window};
use crate::value::{ObjectRef, Value};

pub struct MemoryElement {
    key: Uuid,
    tag: String,
    attributes: RefCell<IndexMap<String, String>>,
    text: RefCell<String>,
    value: RefCell<Option<String>>,
    checked: Cell<bool>,
    selected: Cell<bool>,
    children: RefCell<Vec<Rc<MemoryElement>>>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        MemoryElement {
            key: Uuid::new_v4(),
            tag: tag.to_ascii_lowercase(),
            attributes: RefCell::new(IndexMap::new()),
            text: RefCell::new(String::new()),
            value: RefCell::new(None),
            checked: Cell::new(false),
            selected: Cell::new(false),
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attribute("id", id)
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attribute("class", class)
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    pub fn with_selected(self, selected: bool) -> Self {
        self.selected.set(selected);
        self
    }

    pub fn with_child(self, child: Rc<MemoryElement>) -> Self {
        self.children.borrow_mut().push(child);
        self
    }

    pub fn into_ref(self) -> Rc<MemoryElement> {
        Rc::new(self)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.attributes
            .borrow_mut()
            .shift_remove(&name.to_ascii_lowercase());
    }

    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    pub fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn set_selected(&self, selected: bool) {
        self.selected.set(selected);
    }

    pub fn append_child(&self, child: Rc<MemoryElement>) {
        self.children.borrow_mut().push(child);
    }

    /// Detach the descendant with `key`. Returns whether it was found.
    pub fn remove_descendant(&self, key: Uuid) -> bool {
        let mut children = self.children.borrow_mut();
        if let Some(pos) = children.iter().position(|c| c.key == key) {
            children.remove(pos);
            return true;
        }
        children.iter().any(|c| c.remove_descendant(key))
    }

    fn default_value(&self) -> String {
        match self.tag.as_str() {
            "textarea" => self.text.borrow().clone(),
            "option" => self
                .attribute("value")
                .unwrap_or_else(|| self.text_content().trim().to_string()),
            "select" => self
                .options()
                .into_iter()
                .find(|option| option.selected.get())
                .map(|option| option.value())
                .unwrap_or_default(),
            "input" => match self.attribute("value") {
                Some(value) => value,
                None if self.is_checkable() => "on".to_string(),
                None => String::new(),
            },
            _ => String::new(),
        }
    }

    // Options directly under a select or inside its optgroups.
    fn options(&self) -> Vec<Rc<MemoryElement>> {
        let mut options = Vec::new();
        for child in self.children.borrow().iter() {
            match child.tag.as_str() {
                "option" => options.push(child.clone()),
                "optgroup" => options.extend(
                    child
                        .children
                        .borrow()
                        .iter()
                        .filter(|c| c.tag == "option")
                        .cloned(),
                ),
                _ => {}
            }
        }
        options
    }

    fn is_checkable(&self) -> bool {
        self.tag == "input"
            && matches!(
                self.attribute("type").map(|t| t.to_ascii_lowercase()).as_deref(),
                Some("checkbox") | Some("radio")
            )
    }
}

impl HostElement for MemoryElement {
    fn key(&self) -> Uuid {
        self.key
    }

    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    fn text_content(&self) -> String {
        let mut text = self.text.borrow().clone();
        for child in self.children.borrow().iter() {
            text.push_str(&child.text_content());
        }
        text
    }

    fn value(&self) -> String {
        match &*self.value.borrow() {
            Some(value) if self.tag != "select" => value.clone(),
            _ => self.default_value(),
        }
    }

    fn checked(&self) -> bool {
        self.checked.get()
    }

    fn selected(&self) -> bool {
        self.selected.get()
    }

    fn children(&self) -> Vec<Element> {
        self.children
            .borrow()
            .iter()
            .map(|child| child.clone() as Element)
            .collect()
    }
}

/// Document with an `html > body` skeleton.
pub struct MemoryDocument {
    root: Rc<MemoryElement>,
    body: Rc<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let body = MemoryElement::new("body").into_ref();
        let root = MemoryElement::new("html")
            .with_child(MemoryElement::new("head").into_ref())
            .with_child(body.clone())
            .into_ref();
        MemoryDocument { root, body }
    }

    pub fn root(&self) -> &Rc<MemoryElement> {
        &self.root
    }

    pub fn body(&self) -> &Rc<MemoryElement> {
        &self.body
    }

    /// Detach an element from wherever it sits in the tree.
    pub fn remove(&self, key: Uuid) -> bool {
        self.root.remove_descendant(key)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for MemoryDocument {
    fn query_selector(&self, selector: &str) -> Option<Element> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(e) => {
                debug!(error = %e, "selector matches nothing");
                return None;
            }
        };
        let root: Element = self.root.clone();
        list.first_match(&root)
    }
}

pub struct MemoryWindow {
    location: RefCell<String>,
    name: RefCell<String>,
    global: ObjectRef,
    document: Rc<MemoryDocument>,
    frame_element: RefCell<Option<Element>>,
    parent: RefCell<Weak<MemoryWindow>>,
    frames: RefCell<Vec<Rc<MemoryWindow>>>,
    focused: Cell<bool>,
}

impl MemoryWindow {
    pub fn new(location: &str) -> Rc<MemoryWindow> {
        Rc::new(MemoryWindow {
            location: RefCell::new(location.to_string()),
            name: RefCell::new(String::new()),
            global: Rc::new(RefCell::new(IndexMap::new())),
            document: Rc::new(MemoryDocument::new()),
            frame_element: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            frames: RefCell::new(Vec::new()),
            focused: Cell::new(false),
        })
    }

    /// Embed `child` as a frame of `parent`. When given, `frame` is the
    /// element hosting the child and is appended to the parent's body.
    /// Children only hold their parent weakly, so the caller keeps the top
    /// window alive.
    pub fn attach_frame(
        parent: &Rc<MemoryWindow>,
        child: &Rc<MemoryWindow>,
        frame: Option<Rc<MemoryElement>>,
    ) {
        if let Some(frame) = frame {
            parent.document.body().append_child(frame.clone());
            *child.frame_element.borrow_mut() = Some(frame as Element);
        }
        *child.parent.borrow_mut() = Rc::downgrade(parent);
        parent.frames.borrow_mut().push(child.clone());
    }

    pub fn dom(&self) -> &Rc<MemoryDocument> {
        &self.document
    }

    pub fn set_location(&self, location: &str) {
        *self.location.borrow_mut() = location.to_string();
    }

    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    pub fn set_focus(&self, focused: bool) {
        self.focused.set(focused);
    }

    /// Define (or replace) a property of the global namespace.
    pub fn set_global(&self, name: &str, value: Value) {
        self.global.borrow_mut().insert(name.to_string(), value);
    }

    pub fn remove_global(&self, name: &str) {
        self.global.borrow_mut().shift_remove(name);
    }

    pub fn as_window(self: &Rc<Self>) -> Window {
        self.clone()
    }
}

impl HostWindow for MemoryWindow {
    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn name(&self) -> String {
        self.name.borrow().clone()
    }

    fn global(&self) -> Value {
        Value::Object(self.global.clone())
    }

    fn document(&self) -> Rc<dyn HostDocument> {
        self.document.clone()
    }

    fn frame_element(&self) -> Option<Element> {
        self.frame_element.borrow().clone()
    }

    fn parent(&self) -> Option<Window> {
        self.parent
            .borrow()
            .upgrade()
            .map(|parent| parent as Window)
    }

    fn frames(&self) -> Vec<Window> {
        self.frames
            .borrow()
            .iter()
            .map(|frame| frame.clone() as Window)
            .collect()
    }

    fn has_focus(&self) -> bool {
        self.focused.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{any_focused, depth, top};

    #[test]
    fn test_query_selector_document_order() {
        let document = MemoryDocument::new();
        let first = MemoryElement::new("div").with_class("test").into_ref();
        let second = MemoryElement::new("div").with_class("test").into_ref();
        document.body().append_child(first.clone());
        document.body().append_child(second);
        let found = document.query_selector(".test").unwrap();
        assert_eq!(found.key(), first.key());
    }

    #[test]
    fn test_query_selector_combinators() {
        let document = MemoryDocument::new();
        let inner = MemoryElement::new("span").with_class("child").into_ref();
        let outer = MemoryElement::new("div")
            .with_id("outer")
            .with_child(MemoryElement::new("p").with_child(inner.clone()).into_ref())
            .into_ref();
        document.body().append_child(outer);

        assert_eq!(document.query_selector("#outer .child").unwrap().key(), inner.key());
        assert!(document.query_selector("#outer > .child").is_none());
        assert_eq!(document.query_selector("#outer > p > span").unwrap().key(), inner.key());
        assert_eq!(document.query_selector("html span.child").unwrap().key(), inner.key());
        assert!(document.query_selector("xxx").is_none());
        assert!(document.query_selector("!!").is_none());
    }

    #[test]
    fn test_form_values() {
        let input = MemoryElement::new("input")
            .with_attribute("type", "text")
            .with_attribute("value", "initial");
        assert_eq!(input.value(), "initial");
        input.set_value("typed");
        assert_eq!(input.value(), "typed");

        let checkbox = MemoryElement::new("input").with_attribute("type", "checkbox");
        assert_eq!(checkbox.value(), "on");

        let textarea = MemoryElement::new("textarea").with_text("hello");
        assert_eq!(textarea.value(), "hello");

        let select = MemoryElement::new("select")
            .with_child(MemoryElement::new("option").with_text(" One ").into_ref())
            .with_child(
                MemoryElement::new("option")
                    .with_attribute("value", "2")
                    .with_selected(true)
                    .into_ref(),
            );
        assert_eq!(select.value(), "2");

        let grouped = MemoryElement::new("select")
            .with_child(MemoryElement::new("option").with_text("none").into_ref())
            .with_child(
                MemoryElement::new("optgroup")
                    .with_child(
                        MemoryElement::new("option")
                            .with_attribute("value", "fr")
                            .with_selected(true)
                            .into_ref(),
                    )
                    .into_ref(),
            );
        assert_eq!(grouped.value(), "fr");
    }

    #[test]
    fn test_remove_descendant() {
        let document = MemoryDocument::new();
        let elm = MemoryElement::new("div").with_class("test").into_ref();
        document.body().append_child(elm.clone());
        assert!(document.remove(elm.key()));
        assert!(document.query_selector(".test").is_none());
        assert!(!document.remove(elm.key()));
    }

    #[test]
    fn test_frame_tree() {
        let top_window = MemoryWindow::new("https://example.com/");
        let middle = MemoryWindow::new("https://example.com/middle");
        let inner = MemoryWindow::new("https://example.com/inner");
        MemoryWindow::attach_frame(
            &top_window,
            &middle,
            Some(MemoryElement::new("iframe").into_ref()),
        );
        MemoryWindow::attach_frame(&middle, &inner, None);

        let inner_window = inner.as_window();
        assert_eq!(depth(&inner_window), 2);
        assert_eq!(top(&inner_window).location(), "https://example.com/");
        assert!(inner.frame_element().is_none());
        assert!(middle.frame_element().is_some());

        assert!(!any_focused(&top(&inner_window)));
        inner.set_focus(true);
        assert!(any_focused(&top(&inner_window)));
    }
}
