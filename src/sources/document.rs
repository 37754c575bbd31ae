//! `document.*` sources: lookups against the live element tree.

use std::collections::HashSet;

use super::{bind, string_arg};
use crate::host::{Element, Window};
use crate::registry::SourceTree;
use crate::value::Value;

lazy_static! {
    static ref CHECKABLE_TYPES: HashSet<&'static str> =
        ["checkbox", "radio"].iter().copied().collect();
    static ref NON_TEXT_INPUT_TYPES: HashSet<&'static str> = [
        "button", "checkbox", "file", "image", "radio", "reset", "submit",
    ]
    .iter()
    .copied()
    .collect();
}

/// Register the document sources with the tree.
pub fn register(tree: &mut SourceTree, window: &Window) {
    let document = SourceTree::new()
        .with_getter("element", bind(window, element))
        .with_getter("text", bind(window, text))
        .with_getter("value", bind(window, value))
        .with_getter("checked", bind(window, checked));

    tree.insert_branch("document", document);
}

fn find(window: &Window, args: &[Value]) -> Option<Element> {
    let selector = string_arg(args, 0)?;
    window.document().query_selector(selector)
}

fn input_type(element: &Element) -> String {
    element
        .attribute("type")
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string())
}

fn is_checkable(element: &Element) -> bool {
    element.tag_name() == "input" && CHECKABLE_TYPES.contains(input_type(element).as_str())
}

/// `document.element(selector)`
///
/// First matching element or `Null`.
pub fn element(window: &Window, args: &[Value]) -> Value {
    find(window, args).map_or(Value::Null, Value::Element)
}

/// `document.text(selector)`
///
/// Text content of the first matching element.
pub fn text(window: &Window, args: &[Value]) -> Value {
    find(window, args).map_or(Value::Null, |e| Value::String(e.text_content()))
}

/// `document.value(selector)`
///
/// Value of the first matching form field. Text-like inputs and textareas
/// give their current value. Checkboxes and radios give their value only
/// while checked. A single select gives the value of its selected option, a
/// multiple select the array of selected values. Anything else is `Null`.
pub fn value(window: &Window, args: &[Value]) -> Value {
    match find(window, args) {
        Some(element) => field_value(&element),
        None => Value::Null,
    }
}

fn field_value(element: &Element) -> Value {
    match element.tag_name().as_str() {
        "textarea" => Value::String(element.value()),
        "input" if is_checkable(element) => {
            if element.checked() {
                Value::String(element.value())
            } else {
                Value::Null
            }
        }
        "input" if NON_TEXT_INPUT_TYPES.contains(input_type(element).as_str()) => Value::Null,
        "input" => Value::String(element.value()),
        "select" => {
            let selected = selected_options(element);
            if element.attribute("multiple").is_some() {
                Value::Array(selected.iter().map(|o| Value::String(o.value())).collect())
            } else {
                selected
                    .first()
                    .map_or(Value::Null, |o| Value::String(o.value()))
            }
        }
        _ => Value::Null,
    }
}

// Options directly under the select or inside its optgroups.
fn selected_options(select: &Element) -> Vec<Element> {
    let mut options = Vec::new();
    for child in select.children() {
        match child.tag_name().as_str() {
            "option" => options.push(child),
            "optgroup" => options.extend(
                child
                    .children()
                    .into_iter()
                    .filter(|c| c.tag_name() == "option"),
            ),
            _ => {}
        }
    }
    options.retain(|o| o.selected());
    options
}

/// `document.checked(selector)`
///
/// Checked state of a checkbox or radio, `Null` for anything else.
pub fn checked(window: &Window, args: &[Value]) -> Value {
    match find(window, args) {
        Some(element) if is_checkable(&element) => Value::Boolean(element.checked()),
        _ => Value::Null,
    }
}
