//! Composable data-structure validation and coercion.
//!
//! Describe the expected shape of a value (scalar type, numeric bound,
//! pattern, keyed record, homogeneous sequence, disjunction, conjunction,
//! custom block) as a tree of immutable **definitions**, then *conform*
//! inputs against it. Conforming validates and transforms in one step:
//! rules like "text → float" or "milliseconds → timestamp" check and coerce
//! at the same time.
//!
//! The outcome is a [`ConformResult`]: either the conformed output value, or
//! a list of [`ConformError`]s addressed by RFC 6901 JSON Pointers and keyed
//! by stable, translatable message keys.
//!
//! ```rust
//! use conformal::prelude::*;
//!
//! let event = keys()
//!     .required("title", non_empty_string())
//!     .required("attendees", each(value_type(ValueKind::Int)))
//!     .optional_default("public", value_type(ValueKind::Bool), false)
//!     .build()
//!     .unwrap();
//!
//! let input = Value::map([
//!     (Key::sym("title"), Value::text("standup")),
//!     (Key::sym("attendees"), Value::seq([Value::Int(1), Value::Int(2)])),
//! ]);
//!
//! let result = event.conform(&input);
//! assert!(result.passed());
//! assert_eq!(
//!     result.value().as_map().unwrap().get(&Key::sym("public")),
//!     Some(&Value::Bool(false)),
//! );
//!
//! let result = event.conform(&Value::map([(Key::sym("title"), Value::text(""))]));
//! assert!(result.failed());
//! assert_eq!(result.root_errors()[0].path().as_str(), "/title");
//! ```
//!
//! Definitions are pure and `Send + Sync`: build a tree once, conform from
//! as many threads as you like.

pub mod definitions;
pub mod error;
pub mod result;
pub mod translate;
pub mod value;

pub use definitions::{Def, Definition, DefinitionExt};
pub use error::{ConfigError, ConformError, ErrorCode};
pub use result::ConformResult;
pub use translate::Translations;
pub use value::{Key, Value, ValueKind, ValueMap};

/// Everything needed to build and conform definitions.
pub mod prelude {
    pub use crate::definitions::{
        And, Def, Definition, DefinitionExt, Each, Enum, Equal, KeySpec, Keys, KeysBuilder,
        Lambda, LambdaScope, Nilable, Or, Test, and, boolean, coercible_type, each, empty,
        enum_of, equal, greater_than, greater_than_equal, keys, lambda, less_than,
        less_than_equal, matches, max_size, min_size, nil, nilable, non_empty,
        non_empty_string, or, test, value_type,
    };
    pub use crate::error::{ConfigError, ConformError, ErrorCode};
    pub use crate::result::ConformResult;
    pub use crate::translate::Translations;
    pub use crate::value::{Key, Value, ValueKind, ValueMap};
}
