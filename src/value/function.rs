use std::fmt;
use std::rc::Rc;

use super::Value;

/// A callable source: positional arguments in, one value out.
///
/// Cloning shares the underlying closure, and equality is identity, so a
/// getter taken out of a registry compares equal to the one that was put in.
#[derive(Clone)]
pub struct Getter(Rc<dyn Fn(&[Value]) -> Value>);

impl Getter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Getter(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Getter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Getter {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Getter({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}
