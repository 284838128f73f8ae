//! LAMBDA - user-supplied conform blocks.
//!
//! The block writes its outcome into a [`LambdaScope`] instead of returning
//! it: call [`conform_with`](LambdaScope::conform_with) to register success
//! with an output value, or [`fail_with`](LambdaScope::fail_with) for a
//! custom failure. A block that records nothing fails with `lambda_failed`.
//! Panics inside the block propagate unchanged.

use std::fmt;
use std::sync::Arc;

use crate::definitions::{Def, Definition};
use crate::error::{Args, ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::Value;

// ============================================================================
// SCOPE
// ============================================================================

/// The continuation context handed to a lambda block.
///
/// Exactly one outcome may be recorded; recording a second one is a
/// programmer error and panics.
#[derive(Debug)]
pub struct LambdaScope {
    name: String,
    outcome: Option<Outcome>,
}

#[derive(Debug)]
enum Outcome {
    Conformed(Value),
    Failed(ErrorCode, Args),
}

impl LambdaScope {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            outcome: None,
        }
    }

    /// Registers success with `value` as the conformed output.
    ///
    /// # Panics
    ///
    /// Panics when an outcome was already recorded.
    pub fn conform_with(&mut self, value: impl Into<Value>) {
        self.record(Outcome::Conformed(value.into()));
    }

    /// Registers a custom failure under `key` with positional `args`.
    ///
    /// # Panics
    ///
    /// Panics when an outcome was already recorded.
    pub fn fail_with(
        &mut self,
        key: impl Into<String>,
        args: impl IntoIterator<Item = impl fmt::Display>,
    ) {
        self.record(Outcome::Failed(
            ErrorCode::custom(key),
            args.into_iter().map(|a| a.to_string()).collect(),
        ));
    }

    fn record(&mut self, outcome: Outcome) {
        assert!(
            self.outcome.is_none(),
            "lambda '{}' recorded a second outcome; each conform honors exactly one \
             conform_with or fail_with call",
            self.name
        );
        self.outcome = Some(outcome);
    }
}

// ============================================================================
// LAMBDA
// ============================================================================

/// A definition whose conform behavior is a user block.
pub struct Lambda {
    name: String,
    block: Box<dyn Fn(&Value, &mut LambdaScope) + Send + Sync>,
}

impl Lambda {
    /// Creates a lambda definition from a block.
    pub fn new(
        name: impl Into<String>,
        block: impl Fn(&Value, &mut LambdaScope) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            block: Box::new(block),
        }
    }
}

impl Definition for Lambda {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let mut scope = LambdaScope::new(&self.name);
        (self.block)(value, &mut scope);
        match scope.outcome {
            Some(Outcome::Conformed(out)) => ConformResult::Passed(out),
            Some(Outcome::Failed(code, args)) => {
                ConformResult::fail(ConformError::new(code).with_args(args))
            }
            None => ConformResult::fail(
                ConformError::new(ErrorCode::LambdaFailed).with_arg(&self.name),
            ),
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("name", &self.name)
            .field("block", &"<function>")
            .finish()
    }
}

/// Creates a lambda definition from a block.
pub fn lambda(
    name: impl Into<String>,
    block: impl Fn(&Value, &mut LambdaScope) + Send + Sync + 'static,
) -> Def {
    Arc::new(Lambda::new(name, block))
}
