//! `environment.*` sources: the browsing context of the bound window.

use super::{bind, string_arg};
use crate::host::{self, Window};
use crate::registry::SourceTree;
use crate::value::Value;

pub fn register(tree: &mut SourceTree, window: &Window) {
    let environment = SourceTree::new()
        .with_getter("current_url", bind(window, current_url))
        .with_getter("frame_name", bind(window, frame_name))
        .with_getter("frame_id", bind(window, frame_id))
        .with_getter("frame_element", bind(window, frame_element))
        .with_getter("frame_attribute", bind(window, frame_attribute))
        .with_getter("frame_depth", bind(window, frame_depth))
        .with_getter("has_focus", bind(window, has_focus));

    tree.insert_branch("environment", environment);
}

pub fn current_url(window: &Window, _args: &[Value]) -> Value {
    Value::String(window.location())
}

/// Window name, `""` when unnamed.
pub fn frame_name(window: &Window, _args: &[Value]) -> Value {
    Value::String(window.name())
}

/// `id` of the embedding frame element. `Null` at the top level or when
/// the frame has no id.
pub fn frame_id(window: &Window, _args: &[Value]) -> Value {
    window
        .frame_element()
        .and_then(|frame| frame.attribute("id"))
        .map_or(Value::Null, Value::String)
}

pub fn frame_element(window: &Window, _args: &[Value]) -> Value {
    window.frame_element().map_or(Value::Null, Value::Element)
}

/// `frame_attribute(name)`
pub fn frame_attribute(window: &Window, args: &[Value]) -> Value {
    let name = match string_arg(args, 0) {
        Some(name) => name,
        None => return Value::Null,
    };
    window
        .frame_element()
        .and_then(|frame| frame.attribute(name))
        .map_or(Value::Null, Value::String)
}

/// Number of windows between this one and the top window.
pub fn frame_depth(window: &Window, _args: &[Value]) -> Value {
    Value::from(host::depth(window))
}

/// Whether any window of the whole frame tree has focus.
pub fn has_focus(window: &Window, _args: &[Value]) -> Value {
    Value::Boolean(host::any_focused(&host::top(window)))
}
