//! Size, emptiness and pattern leaves, all instances of [`Test`].

use std::sync::Arc;

use regex::Regex;

use crate::definitions::and::And;
use crate::definitions::{Def, test::Test};
use crate::error::{ConfigError, ErrorCode};
use crate::value::{Value, ValueKind};

/// Passes iff the input is sized and holds at least `min` elements.
///
/// Text is measured in characters, sequences and mappings in entries.
pub fn min_size(min: usize) -> Def {
    Arc::new(Test::new("min_size", ErrorCode::SizeMin, [min], move |v: &Value| {
        v.size().is_some_and(|s| s >= min)
    }))
}

/// Passes iff the input is sized and holds at most `max` elements.
pub fn max_size(max: usize) -> Def {
    Arc::new(Test::new("max_size", ErrorCode::SizeMax, [max], move |v: &Value| {
        v.size().is_some_and(|s| s <= max)
    }))
}

/// Passes iff the input is sized and empty.
pub fn empty() -> Def {
    Arc::new(Test::new("empty", ErrorCode::SizeMax, [0], |v: &Value| {
        v.size() == Some(0)
    }))
}

/// Passes iff the input is sized and non-empty.
pub fn non_empty() -> Def {
    Arc::new(Test::new("non_empty", ErrorCode::SizeMin, [1], |v: &Value| {
        v.size().is_some_and(|s| s >= 1)
    }))
}

/// Passes iff the input is text matching `pattern` (unanchored).
///
/// # Errors
///
/// [`ConfigError::Pattern`] when the pattern does not compile.
pub fn matches(pattern: &str) -> Result<Def, ConfigError> {
    let regex = Regex::new(pattern)?;
    Ok(Arc::new(Test::new(
        "regex",
        ErrorCode::RegexFailed,
        [pattern],
        move |v: &Value| v.as_text().is_some_and(|s| regex.is_match(s)),
    )))
}

/// Text that is also non-empty; the everyday title/name field.
pub fn non_empty_string() -> Def {
    Arc::new(And {
        name: "non_empty_string".to_owned(),
        children: vec![
            crate::definitions::types::value_type(ValueKind::Text),
            non_empty(),
        ],
    })
}
