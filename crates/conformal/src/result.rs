//! The outcome of a conform.

use indexmap::IndexMap;

use crate::error::ConformError;
use crate::translate::DEFAULT_LOCALE;
use crate::value::Value;

// ============================================================================
// CONFORM RESULT
// ============================================================================

/// Either a (possibly transformed) output value or a non-empty list of
/// path-tagged errors.
///
/// A passed result never carries errors and a failed result never carries a
/// value; [`value`](Self::value) on a failure is a programmer error and
/// panics with a descriptive message. Use [`into_result`](Self::into_result)
/// or [`into_value`](Self::into_value) for non-panicking access.
#[derive(Debug, Clone, PartialEq)]
pub enum ConformResult {
    /// The input conformed; carries the output value.
    Passed(Value),
    /// The input did not conform; carries the node-level errors.
    Failed(Vec<ConformError>),
}

impl ConformResult {
    /// Creates a passed result.
    pub fn pass(value: impl Into<Value>) -> Self {
        Self::Passed(value.into())
    }

    /// Creates a failed result from a single error.
    pub fn fail(error: ConformError) -> Self {
        Self::Failed(vec![error])
    }

    /// Creates a failed result from a list of errors.
    ///
    /// The list must be non-empty; an empty list would be a passed result
    /// pretending to have failed.
    pub fn fail_all(errors: Vec<ConformError>) -> Self {
        debug_assert!(!errors.is_empty(), "failed result without errors");
        Self::Failed(errors)
    }

    /// Whether the input conformed.
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed(_))
    }

    /// Whether the input did not conform.
    pub fn failed(&self) -> bool {
        !self.passed()
    }

    /// The conformed output value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failed result.
    pub fn value(&self) -> &Value {
        match self {
            Self::Passed(value) => value,
            Self::Failed(errors) => panic!(
                "value() called on a failed conform result ({} error(s))",
                errors.len()
            ),
        }
    }

    /// The conformed output value, or `None` for a failure.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Passed(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<Value, Vec<ConformError>> {
        match self {
            Self::Passed(value) => Ok(value),
            Self::Failed(errors) => Err(errors),
        }
    }

    /// The node-level error list; empty for a passed result.
    ///
    /// These are the errors the failing node itself produced; causes from
    /// deeper nodes hang off their [`nested`](ConformError::nested) lists.
    pub fn root_errors(&self) -> &[ConformError] {
        match self {
            Self::Passed(_) => &[],
            Self::Failed(errors) => errors,
        }
    }

    /// Every error, flattened: a preorder traversal of the nested-error
    /// tree with fully-qualified paths.
    pub fn errors(&self) -> Vec<&ConformError> {
        self.root_errors().iter().flat_map(ConformError::walk).collect()
    }

    /// Hierarchical view keyed by top-level path fragment.
    ///
    /// Each node-level error is grouped under the first token of its path;
    /// errors attached to the root itself group under `""`. Useful for
    /// per-field validation summaries.
    pub fn error_hash(&self) -> IndexMap<String, Vec<&ConformError>> {
        let mut hash: IndexMap<String, Vec<&ConformError>> = IndexMap::new();
        for error in self.root_errors() {
            let fragment = error
                .path()
                .split_front()
                .map(|(token, _)| token.decoded().into_owned())
                .unwrap_or_default();
            hash.entry(fragment).or_default().push(error);
        }
        hash
    }

    /// Human-readable message for the default locale: each node-level
    /// error's template rendered recursively, child messages delimited by
    /// `{ … }`.
    pub fn error_message(&self) -> String {
        self.error_message_for(DEFAULT_LOCALE)
    }

    /// Like [`error_message`](Self::error_message) for a specific locale.
    pub fn error_message_for(&self, locale: &str) -> String {
        self.root_errors()
            .iter()
            .map(|error| render_tree(error, locale))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn render_tree(error: &ConformError, locale: &str) -> String {
    let message = error.translated_error(locale);
    if error.nested().is_empty() {
        message
    } else {
        let causes = error
            .nested()
            .iter()
            .map(|child| render_tree(child, locale))
            .collect::<Vec<_>>()
            .join("; ");
        format!("{message} {{ {causes} }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use jsonptr::Token;

    #[test]
    fn passed_carries_value_and_no_errors() {
        let result = ConformResult::pass(3);
        assert!(result.passed());
        assert_eq!(result.value(), &Value::Int(3));
        assert!(result.errors().is_empty());
    }

    #[test]
    #[should_panic(expected = "failed conform result")]
    fn value_on_failure_panics() {
        let result = ConformResult::fail(ConformError::new(ErrorCode::NilFailed));
        let _ = result.value();
    }

    #[test]
    fn errors_flatten_preorder() {
        let leaf = ConformError::new(ErrorCode::GtFailed).with_arg(5);
        let wrapper = ConformError::new(ErrorCode::AndFailed)
            .with_arg("range")
            .with_nested(vec![leaf]);
        let result =
            ConformResult::fail_all(vec![wrapper, ConformError::new(ErrorCode::NilFailed)]);

        let keys: Vec<_> = result.errors().into_iter().map(ConformError::key).collect();
        assert_eq!(keys, ["and_failed", "gt_failed", "nil_failed"]);
    }

    #[test]
    fn error_hash_groups_by_first_fragment() {
        let title = ConformError::new(ErrorCode::KeyFailed)
            .with_arg("title")
            .prefixed(Token::new("title"));
        let extra = ConformError::new(ErrorCode::UnexpectedKey)
            .with_arg("extra")
            .prefixed(Token::new("extra"));
        let root = ConformError::new(ErrorCode::NotAMapping).with_arg("integer");

        let result = ConformResult::fail_all(vec![title, extra, root]);
        let hash = result.error_hash();
        assert_eq!(hash.len(), 3);
        assert_eq!(hash["title"].len(), 1);
        assert_eq!(hash["extra"].len(), 1);
        assert_eq!(hash[""].len(), 1);
    }

    #[test]
    fn error_message_nests_with_braces() {
        let leaf = ConformError::new(ErrorCode::GtFailed).with_arg(5);
        let result = ConformResult::fail(
            ConformError::new(ErrorCode::AndFailed)
                .with_arg("range")
                .with_nested(vec![leaf]),
        );
        assert_eq!(
            result.error_message(),
            "'range' did not conform { value must be greater than 5 }"
        );
    }
}
