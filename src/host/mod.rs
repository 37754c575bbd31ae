//! Host accessors.
//!
//! Built-in sources never touch ambient globals. They read the page through
//! these traits, so any host (a real browser binding, a recorded snapshot,
//! a test double) can back them. [`memory`] provides the in-process
//! implementation used by the tests and the CLI.
//!
//! ```
//! use value_source::host::memory::{MemoryElement, MemoryWindow};
//! use value_source::host::{HostElement, HostWindow};
//!
//! let window = MemoryWindow::new("https://example.com/");
//! window.dom().body().append_child(MemoryElement::new("div").with_id("main").into_ref());
//!
//! let found = window.document().query_selector("#main").unwrap();
//! assert_eq!(found.tag_name(), "div");
//! ```

pub mod fixture;
pub mod memory;
pub mod selector;

use std::rc::Rc;

use uuid::Uuid;

use crate::value::Value;

/// A DOM element as seen by the document sources.
pub trait HostElement {
    /// Stable identity; two handles to the same element share a key.
    fn key(&self) -> Uuid;

    /// Lower-case tag name.
    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self) -> String;

    /// Current value of a form control (the `value` property, not the
    /// attribute).
    fn value(&self) -> String;

    fn checked(&self) -> bool;

    /// Selection state of an `option` element.
    fn selected(&self) -> bool;

    fn children(&self) -> Vec<Element>;
}

pub type Element = Rc<dyn HostElement>;

pub trait HostDocument {
    /// First element in document order matching `selector`. An invalid
    /// selector matches nothing.
    fn query_selector(&self, selector: &str) -> Option<Element>;
}

pub trait HostWindow {
    /// Full URL of the window's document.
    fn location(&self) -> String;

    fn name(&self) -> String;

    /// The global namespace object.
    fn global(&self) -> Value;

    fn document(&self) -> Rc<dyn HostDocument>;

    /// The `frame`/`iframe` element embedding this window, if any.
    fn frame_element(&self) -> Option<Element>;

    /// `None` for the top-level window.
    fn parent(&self) -> Option<Window>;

    /// Windows of the frames directly embedded in this window's document.
    fn frames(&self) -> Vec<Window>;

    /// Whether this window's own document has focus.
    fn has_focus(&self) -> bool;
}

pub type Window = Rc<dyn HostWindow>;

/// The top-level window of the frame tree `window` belongs to.
pub fn top(window: &Window) -> Window {
    let mut current = window.clone();
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
}

/// Number of windows above `window`.
pub fn depth(window: &Window) -> usize {
    let mut result = 0;
    let mut current = window.clone();
    while let Some(parent) = current.parent() {
        result += 1;
        current = parent;
    }
    result
}

/// Whether any window in the subtree rooted at `window` has focus.
pub fn any_focused(window: &Window) -> bool {
    window.has_focus() || window.frames().iter().any(any_focused)
}
