//! # value-source - value source registry and resolver
//!
//! Named "sources" are getter functions organised in a nested namespace and
//! addressed by dot-paths. A request names one or more sources, the first
//! one that yields something wins, and a default covers the rest.
//!
//! - Registry maintenance: sanitize, merge, lookup and removal by dot-path
//! - First-non-null-wins resolution with positional parameters
//! - Built-in sources for the global namespace, the document and the
//!   browsing environment, read through an injectable host interface
//! - An in-memory host with a small CSS selector engine
//! - TOML configuration for named requests and host fixtures
//!
//! ## Quick Start
//!
//! ### Resolving against custom sources
//!
//! ```
//! use value_source::registry::{SourceGetter, SourceTree, ValueRequest};
//! use value_source::value::Value;
//!
//! let sources = SourceTree::new()
//!     .with_fn("empty", |_| Value::Null)
//!     .with_branch(
//!         "math",
//!         SourceTree::new().with_fn("double", |args| match args.first() {
//!             Some(Value::Number(n)) => Value::from(n.as_f64() * 2.0),
//!             _ => Value::Null,
//!         }),
//!     );
//! let getter = SourceGetter::from(sources);
//!
//! let request = ValueRequest::new(["empty", "math.double"]).with_parameters(21);
//! assert_eq!(getter.get_value(&request), Value::from(42.0));
//! ```
//!
//! ### Built-in sources on a host
//!
//! ```
//! use value_source::host::memory::{MemoryElement, MemoryWindow};
//! use value_source::registry::{SourceGetter, ValueRequest};
//! use value_source::value::Value;
//!
//! let window = MemoryWindow::new("https://example.com/form");
//! window.dom().body().append_child(
//!     MemoryElement::new("input")
//!         .with_id("email")
//!         .with_value("someone@example.com")
//!         .into_ref(),
//! );
//!
//! let getter = SourceGetter::with_builtins(window.as_window());
//!
//! let email = ValueRequest::new("document.value").with_parameters("#email");
//! assert_eq!(getter.get_value(&email), Value::from("someone@example.com"));
//!
//! let url = ValueRequest::new("environment.current_url");
//! assert_eq!(getter.get_value(&url), Value::from("https://example.com/form"));
//! ```
//!
//! ## Architecture
//!
//! - **[`registry`]** - Source trees, resolution and the [`SourceGetter`] controller
//! - **[`sources`]** - Built-in sources (`direct`, `global`, `document.*`, `environment.*`)
//! - **[`host`]** - Host traits, the in-memory host, selectors and fixtures
//! - **[`value`]** - The dynamic [`Value`] passed to and returned by getters
//! - **[`path`]** - Dot-path parsing
//! - **[`error`]** - Error types

#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod host;
pub mod path;
pub mod registry;
pub mod sources;
pub mod value;

pub use registry::{SourceGetter, SourceTree, ValueRequest};
pub use value::Value;
