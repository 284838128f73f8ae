//! Small equality-based leaves: Equal, Enum, Nil, Boolean, and the
//! null-passthrough Nilable.

use std::sync::Arc;

use crate::definitions::{Def, Definition};
use crate::error::{ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::Value;

// ============================================================================
// EQUAL
// ============================================================================

/// Passes iff the input equals one expected value.
#[derive(Debug, Clone)]
pub struct Equal {
    expected: Value,
}

impl Equal {
    /// Creates an equality leaf.
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Definition for Equal {
    fn name(&self) -> &str {
        "equal"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if *value == self.expected {
            ConformResult::Passed(value.clone())
        } else {
            ConformResult::fail(
                ConformError::new(ErrorCode::EqualFailed).with_arg(&self.expected),
            )
        }
    }
}

/// Creates an equality leaf.
pub fn equal(expected: impl Into<Value>) -> Def {
    Arc::new(Equal::new(expected))
}

// ============================================================================
// ENUM
// ============================================================================

/// Passes iff the input equals one of the declared members.
#[derive(Debug, Clone)]
pub struct Enum {
    members: Vec<Value>,
}

impl Enum {
    /// Creates a membership leaf.
    pub fn new(members: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// The declared members, in declaration order.
    pub fn members(&self) -> &[Value] {
        &self.members
    }
}

impl Definition for Enum {
    fn name(&self) -> &str {
        "enum"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if self.members.contains(value) {
            ConformResult::Passed(value.clone())
        } else {
            ConformResult::fail(
                ConformError::new(ErrorCode::EnumFailed)
                    .with_arg(Value::Seq(self.members.clone())),
            )
        }
    }
}

/// Creates a membership leaf.
pub fn enum_of(members: impl IntoIterator<Item = impl Into<Value>>) -> Def {
    Arc::new(Enum::new(members))
}

// ============================================================================
// NIL / BOOLEAN
// ============================================================================

/// Passes iff the input is the null sentinel.
pub fn nil() -> Def {
    crate::definitions::test::test("nil", ErrorCode::NilFailed, Value::is_null)
}

/// Passes iff the input is a boolean.
pub fn boolean() -> Def {
    crate::definitions::test::test("boolean", ErrorCode::BooleanFailed, |v| {
        matches!(v, Value::Bool(_))
    })
}

// ============================================================================
// NILABLE
// ============================================================================

/// Null passes through as null; anything else is delegated to the inner
/// definition, whose errors surface unchanged.
#[derive(Debug, Clone)]
pub struct Nilable {
    inner: Def,
}

impl Nilable {
    /// Wraps `inner` so that null is accepted too.
    pub fn new(inner: Def) -> Self {
        Self { inner }
    }

    /// The wrapped definition.
    pub fn inner(&self) -> &Def {
        &self.inner
    }
}

impl Definition for Nilable {
    fn name(&self) -> &str {
        "nilable"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if value.is_null() {
            ConformResult::Passed(Value::Null)
        } else {
            self.inner.conform(value)
        }
    }
}

/// Wraps a definition so that null is accepted too.
pub fn nilable(inner: Def) -> Def {
    Arc::new(Nilable::new(inner))
}
