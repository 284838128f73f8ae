//! Type-identity checks and primitive coercion.

use std::sync::Arc;

use tracing::trace;

use crate::definitions::{Def, Definition};
use crate::error::{ConfigError, ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::{Value, ValueKind};

// ============================================================================
// TYPE
// ============================================================================

/// Exact runtime-tag match; the value passes through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Type {
    kind: ValueKind,
}

impl Type {
    /// Creates a type-identity leaf for `kind`.
    pub fn new(kind: ValueKind) -> Self {
        Self { kind }
    }

    /// The expected kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

impl Definition for Type {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if value.kind() == self.kind {
            ConformResult::Passed(value.clone())
        } else {
            ConformResult::fail(
                ConformError::new(ErrorCode::TypeError)
                    .with_args([self.kind, value.kind()]),
            )
        }
    }
}

/// Creates a type-identity leaf.
pub fn value_type(kind: ValueKind) -> Def {
    Arc::new(Type::new(kind))
}

// ============================================================================
// COERCIBLE TYPE
// ============================================================================

/// Type match with primitive fallback coercion.
///
/// A value already of the target kind passes as-is; otherwise a well-defined
/// primitive conversion is attempted and its output becomes the conformed
/// value. Only primitive targets exist: asking for a coercible sequence or
/// mapping is a configuration error, caught at construction.
///
/// The coercion table:
///
/// | target  | accepts |
/// |---------|---------|
/// | integer | text (strict integer parse), float (truncated) |
/// | float   | integer, text |
/// | string  | integer, float, boolean |
/// | boolean | `"true"` / `"false"` text |
#[derive(Debug, Clone, Copy)]
pub struct CoercibleType {
    kind: ValueKind,
}

impl CoercibleType {
    /// Creates a coercing leaf for a primitive `kind`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotCoercible`] when `kind` is not one of the primitive
    /// kinds in the table above.
    pub fn new(kind: ValueKind) -> Result<Self, ConfigError> {
        match kind {
            ValueKind::Int | ValueKind::Float | ValueKind::Text | ValueKind::Bool => {
                Ok(Self { kind })
            }
            _ => Err(ConfigError::NotCoercible { kind }),
        }
    }

    /// The target kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match (self.kind, value) {
            (ValueKind::Int, Value::Text(s)) => s.trim().parse::<i64>().ok().map(Value::Int),
            (ValueKind::Int, Value::Float(f)) if f.is_finite() => Some(Value::Int(*f as i64)),
            (ValueKind::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (ValueKind::Float, Value::Text(s)) => {
                s.trim().parse::<f64>().ok().map(Value::Float)
            }
            (ValueKind::Text, Value::Int(i)) => Some(Value::text(i.to_string())),
            (ValueKind::Text, Value::Float(f)) => Some(Value::text(format!("{f:?}"))),
            (ValueKind::Text, Value::Bool(b)) => Some(Value::text(b.to_string())),
            (ValueKind::Bool, Value::Text(s)) => match s.trim() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Definition for CoercibleType {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if value.kind() == self.kind {
            return ConformResult::Passed(value.clone());
        }
        match self.coerce(value) {
            Some(coerced) => ConformResult::Passed(coerced),
            None => {
                trace!(expected = %self.kind, actual = %value.kind(), "coercion failed");
                ConformResult::fail(
                    ConformError::new(ErrorCode::CoercionError)
                        .with_args([self.kind, value.kind()]),
                )
            }
        }
    }
}

/// Creates a coercing type leaf.
///
/// # Errors
///
/// [`ConfigError::NotCoercible`] for non-primitive target kinds.
pub fn coercible_type(kind: ValueKind) -> Result<Def, ConfigError> {
    Ok(Arc::new(CoercibleType::new(kind)?))
}
