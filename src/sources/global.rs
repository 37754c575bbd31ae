//! `global` source: values from the host's global namespace.

use tracing::debug;

use super::bind;
use crate::host::Window;
use crate::path::DotPath;
use crate::registry::SourceTree;
use crate::value::Value;

pub fn register(tree: &mut SourceTree, window: &Window) {
    tree.insert_getter("global", bind(window, global));
}

/// `global(path = "", parameters = [])`
///
/// Value at `path` in the global namespace; a missing or empty path gives
/// the global object itself and a non-string path gives `Undefined`. A
/// function found there is called with `parameters` (a single non-array
/// parameter is passed as the only argument) and its result returned.
pub fn global(window: &Window, args: &[Value]) -> Value {
    let path = match args.first() {
        None | Some(Value::Undefined) => "",
        Some(Value::String(path)) => path.as_str(),
        Some(other) => {
            debug!(path = other.type_name(), "global path is not a string");
            return Value::Undefined;
        }
    };
    let path = match DotPath::parse(path) {
        Ok(path) => path,
        Err(e) => {
            debug!(error = %e, "global path not found");
            return Value::Undefined;
        }
    };
    let parameters = args
        .get(1)
        .cloned()
        .unwrap_or(Value::Undefined)
        .into_arguments();

    match window.global().get_nested(path.segments()) {
        Some(Value::Function(f)) => f.call(&parameters),
        Some(value) => value,
        None => Value::Undefined,
    }
}
