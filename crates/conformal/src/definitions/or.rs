//! OR combinator - first passing alternative wins.

use std::sync::Arc;

use crate::definitions::{Def, Definition};
use crate::error::{ConfigError, ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::Value;

/// Tries each alternative against the *original* input and returns the
/// first pass. The value is never threaded between alternatives.
///
/// When every alternative fails, the result is a single `or_failed` summary
/// nesting all children's errors in evaluation order.
#[derive(Debug, Clone)]
pub struct Or {
    name: String,
    children: Vec<Def>,
}

impl Or {
    /// Creates a disjunction over one or more children.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyCombinator`] when `children` is empty.
    pub fn new(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Def>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let children: Vec<Def> = children.into_iter().collect();
        if children.is_empty() {
            return Err(ConfigError::EmptyCombinator { name });
        }
        Ok(Self { name, children })
    }

    /// The child definitions, in evaluation order.
    pub fn children(&self) -> &[Def] {
        &self.children
    }
}

impl Definition for Or {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let mut collected = Vec::new();
        for child in &self.children {
            match child.conform(value) {
                passed @ ConformResult::Passed(_) => return passed,
                ConformResult::Failed(errors) => collected.extend(errors),
            }
        }
        ConformResult::fail(
            ConformError::new(ErrorCode::OrFailed)
                .with_arg(&self.name)
                .with_nested(collected),
        )
    }
}

/// Creates a disjunction over one or more children.
///
/// # Errors
///
/// [`ConfigError::EmptyCombinator`] when `children` is empty.
pub fn or(
    name: impl Into<String>,
    children: impl IntoIterator<Item = Def>,
) -> Result<Def, ConfigError> {
    Ok(Arc::new(Or::new(name, children)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::types::value_type;
    use crate::value::ValueKind;

    #[test]
    fn first_pass_wins() {
        let def = or(
            "id",
            [value_type(ValueKind::Int), value_type(ValueKind::Text)],
        )
        .unwrap();
        assert!(def.conform(&Value::Int(3)).passed());
        assert!(def.conform(&Value::text("abc")).passed());
    }

    #[test]
    fn all_failures_are_collected_in_order() {
        let def = or(
            "id",
            [value_type(ValueKind::Int), value_type(ValueKind::Text)],
        )
        .unwrap();
        let result = def.conform(&Value::Bool(true));
        let root = &result.root_errors()[0];
        assert_eq!(root.key(), "or_failed");
        assert_eq!(root.args(), ["id"]);
        let nested: Vec<_> = root.nested().iter().map(|e| e.args()[0].clone()).collect();
        assert_eq!(nested, ["integer", "string"]);
    }

    #[test]
    fn alternatives_see_the_original_input() {
        use crate::definitions::and::and;
        use crate::definitions::numeric::greater_than;
        use crate::definitions::types::coercible_type;

        // First alternative coerces to text and then fails; the second must
        // still see the original integer, not the coerced text.
        let coerce_then_fail = and(
            "text-range",
            [coercible_type(ValueKind::Text).unwrap(), greater_than(5)],
        )
        .unwrap();
        let def = or("id", [coerce_then_fail, value_type(ValueKind::Int)]).unwrap();
        assert_eq!(def.conform(&Value::Int(3)).value(), &Value::Int(3));
    }
}
