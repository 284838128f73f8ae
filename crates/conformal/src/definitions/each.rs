//! EACH combinator - homogeneous sequences with per-index error paths.

use std::sync::Arc;

use jsonptr::Token;

use crate::definitions::{Def, Definition};
use crate::error::{ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::Value;

/// Conforms every element of a sequence against one item definition.
///
/// All elements are visited; a failure at index 2 does not hide one at
/// index 5. Failing elements contribute their errors, re-based under
/// `"/<index>"`, to a single `each_failed` summary whose argument is the
/// number of failing elements. On success the output is the sequence of
/// transformed elements in original order.
#[derive(Debug, Clone)]
pub struct Each {
    item: Def,
}

impl Each {
    /// Creates a sequence validator from an item definition.
    pub fn new(item: Def) -> Self {
        Self { item }
    }

    /// The per-item definition.
    pub fn item(&self) -> &Def {
        &self.item
    }
}

impl Definition for Each {
    fn name(&self) -> &str {
        "each"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let Some(items) = value.as_seq() else {
            return ConformResult::fail(
                ConformError::new(ErrorCode::NotASequence).with_arg(value.kind()),
            );
        };

        let mut out = Vec::with_capacity(items.len());
        let mut nested = Vec::new();
        let mut failing = 0usize;
        for (index, item) in items.iter().enumerate() {
            match self.item.conform(item) {
                ConformResult::Passed(conformed) => out.push(conformed),
                ConformResult::Failed(errors) => {
                    failing += 1;
                    let token = Token::new(index.to_string());
                    nested.extend(errors.into_iter().map(|e| e.prefixed(token.clone())));
                }
            }
        }

        if nested.is_empty() {
            ConformResult::Passed(Value::Seq(out))
        } else {
            ConformResult::fail(
                ConformError::new(ErrorCode::EachFailed)
                    .with_arg(failing)
                    .with_nested(nested),
            )
        }
    }
}

/// Creates a sequence validator from an item definition.
pub fn each(item: Def) -> Def {
    Arc::new(Each::new(item))
}
