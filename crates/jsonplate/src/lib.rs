//! # jsonplate - placeholder templates for structured data
//!
//! A template is a tree of nodes. Each node is either a constant, a variable that is filled in later, a dynamic
//! object whose fields are nodes, a collection of nodes or an object whose slots are declared up front.
//!
//! ## Writing
//!
//! Unresolved variables are written as placeholder text (`${name}` by default). Variables are resolved when the
//! document is written, not when it is built, so the same document can be written any number of times with different
//! variables.
//!
//! ```
//! use jsonplate::{document::Document, shape::Shape, variables, Options};
//!
//! let options = Options::default();
//! let mut doc = Document::default();
//! let root = doc.dynamic(Shape::Any);
//! let port = doc.variable(Shape::Integer, "port");
//! doc.set_field(root, "port", Some(port))?;
//! doc.set_root(root);
//!
//! assert_eq!(doc.to_json_string(&options)?, r#"{"port":"${port}"}"#);
//!
//! doc.set_variables(root, variables! { "port" => 8080 });
//! assert_eq!(doc.to_json_string(&options)?, r#"{"port":8080}"#);
//! # Ok::<(), jsonplate::Error>(())
//! ```
//!
//! ## Scoping
//!
//! Variables can be set on any node. A lookup starts at the variable and walks up through its parents, so values set
//! closer to the variable shadow values set further up. Variables set on the root act as defaults for the whole
//! document.
//!
//! | node           | variables       | `${a}` below resolves to |
//! |----------------|-----------------|--------------------------|
//! | root           | `a = 1`         | `1`                      |
//! | root.child     | `a = 2`         | `2`                      |
//! | root.child     | _none_          | `1`                      |
//!
//! ## Reading
//!
//! Reading needs the expected [shape::Shape]. Strings that match the placeholder syntax become variables, objects
//! become shaped templates when the shape declares slots and dynamic templates otherwise. Everything else becomes a
//! constant, checked against the shape.
//!
//! ```
//! use jsonplate::{document::Document, shape::Shape, Options};
//!
//! let options = Options::default();
//! let doc = Document::from_json_str(r#"{"name": "${user}", "admin": false}"#, Shape::Any, &options)?;
//! let root = doc.root().expect("root is set after reading");
//!
//! assert_eq!(doc.unresolved(root, &options), ["user"]);
//! # Ok::<(), jsonplate::Error>(())
//! ```
//!
//! ## Naming
//!
//! The placeholder syntax ([syntax::VariableSyntax]) and the casing of names ([casing::Casing]) are part of
//! [Options] and apply to reading and writing alike.
pub mod casing;
pub mod document;
mod error;
mod read;
pub mod shape;
pub mod syntax;
pub mod value;
mod visit;
mod write;

pub use error::{Error, Result};
pub use visit::{Visit, VisitNodes};
pub use write::Rendered;

use std::sync::Arc;

/// Conversion settings shared by reading and writing
#[derive(Debug, Clone)]
pub struct Options {
    /// Placeholder syntax
    pub syntax: Arc<dyn syntax::VariableSyntax>,
    /// Casing of slot names, field names and default variable names
    pub casing: casing::Casing,
    /// Read arrays into collections when a list is expected
    pub collections: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            syntax: Arc::new(syntax::DollarBraces),
            casing: Default::default(),
            collections: false,
        }
    }
}

impl Options {
    pub fn with_syntax(mut self, syntax: impl syntax::VariableSyntax + 'static) -> Self {
        self.syntax = Arc::new(syntax);
        self
    }

    pub fn with_casing(mut self, casing: casing::Casing) -> Self {
        self.casing = casing;
        self
    }

    pub fn with_collections(mut self, collections: bool) -> Self {
        self.collections = collections;
        self
    }
}

/// Utility macro to create [document::Variables]
///
/// ```
/// # use jsonplate::variables;
/// let variables = variables! {
///     "name" => "value",
///     "count" => 3,
/// };
/// assert_eq!(variables.len(), 2);
/// ```
#[macro_export]
macro_rules! variables {
    {} => {
        $crate::document::Variables::new()
    };
    { $($name:expr => $value:expr),+ $(,)? } => {{
        let mut variables = $crate::document::Variables::new();
        $(
            variables.insert(::std::string::String::from($name), $crate::value::Value::from($value));
        )+

        variables
    }};
}
