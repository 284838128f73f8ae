//! AND combinator - left-to-right conjunction with value threading.

use std::sync::Arc;

use crate::definitions::{Def, Definition};
use crate::error::{ConfigError, ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::Value;

/// Conforms the value through each child in turn, feeding every child the
/// previous child's output.
///
/// Threading is what makes coercion compose: a text→float coercion followed
/// by a range check hands the range check a float. The chain stops at the
/// first failing child and wraps that child's errors in one `and_failed`
/// summary.
#[derive(Debug, Clone)]
pub struct And {
    pub(crate) name: String,
    pub(crate) children: Vec<Def>,
}

impl And {
    /// Creates a conjunction over one or more children.
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

impl Definition for And {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let mut current = value.clone();
        for child in &self.children {
            match child.conform(&current) {
                ConformResult::Passed(next) => current = next,
                ConformResult::Failed(errors) => {
                    return ConformResult::fail(
                        ConformError::new(ErrorCode::AndFailed)
                            .with_arg(&self.name)
                            .with_nested(errors),
                    );
                }
            }
        }
        ConformResult::Passed(current)
    }
}

/// Creates a conjunction over one or more children.
///
/// # Errors
///
/// [`ConfigError::EmptyCombinator`] when `children` is empty.
pub fn and(
    name: impl Into<String>,
    children: impl IntoIterator<Item = Def>,
) -> Result<Def, ConfigError> {
    Ok(Arc::new(And::new(name, children)?))
}
