//! `direct` source: hands back what it is given. Useful as the last
//! candidate of a request to turn a parameter into the fallback value.

use crate::registry::SourceTree;
use crate::value::{Getter, Value};

pub fn register(tree: &mut SourceTree) {
    tree.insert_getter("direct", Getter::new(direct));
}

/// First argument unchanged, `Undefined` without arguments.
pub fn direct(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Undefined)
}
