//! The named-predicate leaf.
//!
//! Every simple check (numeric bounds, sizes, patterns, emptiness) is an
//! instance of this one shape: a name, a message key, and a predicate over
//! the value. The value is never transformed.

use std::fmt;

use crate::definitions::Definition;
use crate::error::{Args, ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::Value;

/// A leaf that passes the value through untouched when its predicate holds
/// and fails with one coded error when it does not.
pub struct Test {
    name: String,
    code: ErrorCode,
    args: Args,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Test {
    /// Creates a predicate leaf.
    ///
    /// `args` become the failure's positional arguments (the bound of a
    /// comparator, the pattern of a regex, …).
    pub fn new(
        name: impl Into<String>,
        code: ErrorCode,
        args: impl IntoIterator<Item = impl fmt::Display>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            code,
            args: args.into_iter().map(|a| a.to_string()).collect(),
            predicate: Box::new(predicate),
        }
    }
}

impl Definition for Test {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if (self.predicate)(value) {
            ConformResult::Passed(value.clone())
        } else {
            ConformResult::fail(
                ConformError::new(self.code.clone()).with_args(self.args.iter()),
            )
        }
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("name", &self.name)
            .field("code", &self.code)
            .field("args", &self.args)
            .field("predicate", &"<function>")
            .finish()
    }
}

/// Creates a predicate leaf with no error arguments.
pub fn test(
    name: impl Into<String>,
    code: ErrorCode,
    predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> crate::definitions::Def {
    std::sync::Arc::new(Test::new(name, code, Vec::<String>::new(), predicate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_value_through_unchanged() {
        let even = test("even", ErrorCode::custom("odd"), |v| {
            v.as_number().is_some_and(|n| n % 2.0 == 0.0)
        });
        assert_eq!(even.conform(&Value::Int(4)).value(), &Value::Int(4));
    }

    #[test]
    fn fails_with_code_and_args() {
        let leaf = Test::new("min", ErrorCode::SizeMin, [3], |v| {
            v.size().is_some_and(|s| s >= 3)
        });
        let result = leaf.conform(&Value::text("ab"));
        let errors = result.root_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key(), "size_min");
        assert_eq!(errors[0].args(), ["3"]);
        assert_eq!(errors[0].path().as_str(), "");
    }
}
