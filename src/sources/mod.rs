//! Built-in sources.
//!
//! The default registry a [`SourceGetter`](crate::registry::SourceGetter)
//! starts with:
//!
//! ```text
//! direct                      first argument, unchanged
//! global                      value (or call result) at a path of the global namespace
//! document.element            first element matching a selector
//! document.text               its text content
//! document.value              its form value
//! document.checked            checked state of a checkbox/radio
//! environment.current_url     document URL
//! environment.frame_name      window name
//! environment.frame_id        id of the embedding frame element
//! environment.frame_element   the embedding frame element
//! environment.frame_attribute attribute of the embedding frame element
//! environment.frame_depth     number of windows above this one
//! environment.has_focus       whether any window of the frame tree has focus
//! ```
//!
//! Every source reads the host through the [`Window`] it was bound to.

pub mod direct;
pub mod document;
pub mod environment;
pub mod global;

use crate::host::Window;
use crate::registry::SourceTree;
use crate::value::{Getter, Value};

/// Signature of a built-in source: the bound window and the call arguments.
pub type NativeSource = fn(window: &Window, args: &[Value]) -> Value;

/// Close `source` over `window`.
pub fn bind(window: &Window, source: NativeSource) -> Getter {
    let window = window.clone();
    Getter::new(move |args| source(&window, args))
}

/// The complete built-in registry bound to `window`.
pub fn builtin(window: &Window) -> SourceTree {
    let mut tree = SourceTree::new();

    direct::register(&mut tree);
    global::register(&mut tree, window);
    document::register(&mut tree, window);
    environment::register(&mut tree, window);

    tree
}

/// String argument at `index`, if there is one.
pub(crate) fn string_arg(args: &[Value], index: usize) -> Option<&str> {
    args.get(index).and_then(Value::as_str)
}
