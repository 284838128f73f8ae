//! Conform errors and configuration errors.
//!
//! Two strictly separated channels:
//!
//! - [`ConformError`] is the expected, data-driven outcome of conforming bad
//!   input. It is a message key plus positional arguments plus a JSON-Pointer
//!   path, optionally nesting the causes that produced it. Rendering is lazy:
//!   nothing is formatted until a message is requested.
//! - [`ConfigError`] is a programmer mistake caught while *building* a
//!   definition (duplicate record keys, a coercion over a non-primitive
//!   kind, a bad regex). These are ordinary `Result` errors and never appear
//!   inside a conform outcome.

use std::fmt;

use jsonptr::{Pointer, PointerBuf, Token};
use serde::Serialize;
use serde::ser::Serializer;
use smallvec::SmallVec;

use crate::translate::{self, DEFAULT_LOCALE};
use crate::value::ValueKind;

/// Inline capacity for error arguments; most errors carry zero to three.
pub(crate) type Args = SmallVec<[String; 3]>;

// ============================================================================
// ERROR CODES
// ============================================================================

/// Stable message keys for conform errors.
///
/// The `key()` string is what translation tables are keyed by; [`Custom`]
/// covers user-supplied keys from `Lambda::fail_with`.
///
/// [`Custom`]: ErrorCode::Custom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    TypeError,
    CoercionError,
    AndFailed,
    OrFailed,
    EachFailed,
    KeyFailed,
    MissingKey,
    UnexpectedKey,
    NotAMapping,
    NotASequence,
    EnumFailed,
    EqualFailed,
    NilFailed,
    BooleanFailed,
    SizeMin,
    SizeMax,
    RegexFailed,
    GtFailed,
    LtFailed,
    GteFailed,
    LteFailed,
    LambdaFailed,
    /// A key produced by user code (`fail_with`).
    Custom(String),
}

impl ErrorCode {
    /// Creates a custom message key.
    pub fn custom(key: impl Into<String>) -> Self {
        Self::Custom(key.into())
    }

    /// The snake_case message key.
    pub fn key(&self) -> &str {
        match self {
            Self::TypeError => "type_error",
            Self::CoercionError => "coercion_error",
            Self::AndFailed => "and_failed",
            Self::OrFailed => "or_failed",
            Self::EachFailed => "each_failed",
            Self::KeyFailed => "key_failed",
            Self::MissingKey => "missing_key",
            Self::UnexpectedKey => "unexpected_key",
            Self::NotAMapping => "not_a_mapping",
            Self::NotASequence => "not_a_sequence",
            Self::EnumFailed => "enum_failed",
            Self::EqualFailed => "equal_failed",
            Self::NilFailed => "nil_failed",
            Self::BooleanFailed => "boolean_failed",
            Self::SizeMin => "size_min",
            Self::SizeMax => "size_max",
            Self::RegexFailed => "regex_failed",
            Self::GtFailed => "gt_failed",
            Self::LtFailed => "lt_failed",
            Self::GteFailed => "gte_failed",
            Self::LteFailed => "lte_failed",
            Self::LambdaFailed => "lambda_failed",
            Self::Custom(key) => key,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ============================================================================
// CONFORM ERROR
// ============================================================================

/// A single conform failure.
///
/// The path is a JSON Pointer (RFC 6901) relative to the root value being
/// conformed; `""` is the root itself. Container definitions prepend their
/// own fragment to every descendant path as errors bubble up, so stored
/// paths are always fully qualified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConformError {
    code: ErrorCode,
    args: Args,
    path: PointerBuf,
    nested: Vec<ConformError>,
}

impl ConformError {
    /// Creates a root-path error with no arguments.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            args: Args::new(),
            path: PointerBuf::new(),
            nested: Vec::new(),
        }
    }

    /// Appends one positional argument.
    pub fn with_arg(mut self, arg: impl fmt::Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Appends positional arguments.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.args.extend(args.into_iter().map(|a| a.to_string()));
        self
    }

    /// Attaches nested causes.
    pub fn with_nested(mut self, nested: Vec<ConformError>) -> Self {
        self.nested = nested;
        self
    }

    /// Prefixes this error's path, and recursively every nested path, with
    /// one pointer token.
    pub fn prefixed(mut self, token: Token<'static>) -> Self {
        self.prefix(&token);
        self
    }

    pub(crate) fn prefix(&mut self, token: &Token<'static>) {
        self.path.push_front(token.clone());
        for child in &mut self.nested {
            child.prefix(token);
        }
    }

    /// The message key of this error.
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// The snake_case message key of this error.
    pub fn key(&self) -> &str {
        self.code.key()
    }

    /// The positional arguments, already rendered to text.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The fully-qualified JSON-Pointer path of this error.
    pub fn path(&self) -> &Pointer {
        &self.path
    }

    /// The causes this error wraps, in source order.
    pub fn nested(&self) -> &[ConformError] {
        &self.nested
    }

    /// Renders this error's message for `locale` using the process-wide
    /// translation registry. Nested causes are not included; see
    /// [`ConformResult::error_message`](crate::ConformResult::error_message)
    /// for the recursive rendering.
    pub fn translated_error(&self, locale: &str) -> String {
        translate::translate(locale, self.code.key(), &self.args)
    }

    /// Preorder traversal: this error, then every nested cause, depth-first.
    pub fn walk(&self) -> Vec<&ConformError> {
        let mut out = Vec::with_capacity(1 + self.nested.len());
        self.collect(&mut out);
        out
    }

    fn collect<'e>(&'e self, out: &mut Vec<&'e ConformError>) {
        out.push(self);
        for child in &self.nested {
            child.collect(out);
        }
    }
}

impl fmt::Display for ConformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.as_str().is_empty() {
            f.write_str(&self.translated_error(DEFAULT_LOCALE))
        } else {
            write!(f, "{}: {}", self.path, self.translated_error(DEFAULT_LOCALE))
        }
    }
}

impl std::error::Error for ConformError {}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// Programmer mistakes detected while building a definition.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The same key was declared twice within one record definition.
    #[error("duplicate key `{key}` in record definition")]
    DuplicateKey {
        /// The colliding key name.
        key: String,
    },

    /// An `include` brought in a key the including record already declares.
    #[error("include collides on key `{key}`")]
    IncludeCollision {
        /// The colliding key name.
        key: String,
    },

    /// `CoercibleType` was asked to coerce into a non-primitive kind.
    #[error("`{kind}` is not a coercible primitive kind")]
    NotCoercible {
        /// The rejected target kind.
        kind: ValueKind,
    },

    /// An n-ary combinator was built with no children.
    #[error("combinator `{name}` needs at least one child definition")]
    EmptyCombinator {
        /// The combinator's name.
        name: String,
    },

    /// A regex leaf was built from an invalid pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
