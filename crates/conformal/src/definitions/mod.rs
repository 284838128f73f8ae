//! The definition tree: every validator implements one trait.
//!
//! A definition is an immutable node built once at schema-build time and
//! shared freely afterwards; [`conform`](Definition::conform) is pure and
//! safe to call from any number of threads concurrently.
//!
//! Composites hold their children as [`Def`]s (shared trait objects), so a
//! tree can mix leaves, combinators and records built at runtime:
//!
//! ```rust
//! use conformal::prelude::*;
//!
//! let def = keys()
//!     .required("name", value_type(ValueKind::Text))
//!     .optional_default("retries", value_type(ValueKind::Int), 3)
//!     .build()
//!     .unwrap();
//!
//! let input = Value::map([(Key::sym("name"), Value::text("job"))]);
//! let result = def.conform(&input);
//! assert!(result.passed());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::result::ConformResult;
use crate::value::Value;

pub mod and;
pub mod each;
pub mod equality;
pub mod keys;
pub mod lambda;
pub mod numeric;
pub mod or;
pub mod strings;
pub mod test;
pub mod types;

pub use and::{And, and};
pub use each::{Each, each};
pub use equality::{Enum, Equal, Nilable, boolean, enum_of, equal, nil, nilable};
pub use keys::{KeySpec, Keys, KeysBuilder, keys};
pub use lambda::{Lambda, LambdaScope, lambda};
pub use numeric::{greater_than, greater_than_equal, less_than, less_than_equal};
pub use or::{Or, or};
pub use strings::{empty, matches, max_size, min_size, non_empty, non_empty_string};
pub use test::{Test, test};
pub use types::{CoercibleType, Type, coercible_type, value_type};

// ============================================================================
// CORE TRAIT
// ============================================================================

/// The uniform contract every validator node implements.
pub trait Definition: fmt::Debug + Send + Sync {
    /// The node's name, used in error templates.
    fn name(&self) -> &str;

    /// Conforms `value`, producing either a (possibly transformed) output
    /// value or a list of path-tagged errors. Never mutates `value`.
    fn conform(&self, value: &Value) -> ConformResult;
}

/// A shared definition node.
pub type Def = Arc<dyn Definition>;

/// Extension methods available on every definition.
///
/// Automatically implemented; brings owned nodes into the shared-tree form
/// composites expect.
pub trait DefinitionExt: Definition + Sized + 'static {
    /// Wraps this node into a shareable [`Def`].
    fn into_def(self) -> Def {
        Arc::new(self)
    }
}

impl<D: Definition + Sized + 'static> DefinitionExt for D {}
