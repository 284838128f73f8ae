//! Numeric comparator leaves, all instances of [`Test`].
//!
//! Comparators see integers and floats through one numeric view; any other
//! shape fails the predicate (and therefore the comparator).

use std::sync::Arc;

use crate::definitions::{Def, test::Test};
use crate::error::ErrorCode;
use crate::value::Value;

fn comparator(
    name: &str,
    code: ErrorCode,
    bound: Value,
    cmp: impl Fn(f64, f64) -> bool + Send + Sync + 'static,
) -> Def {
    let limit = bound.as_number();
    Arc::new(Test::new(name, code, [&bound], move |value: &Value| {
        match (value.as_number(), limit) {
            (Some(n), Some(limit)) => cmp(n, limit),
            _ => false,
        }
    }))
}

/// Passes iff the input is a number strictly greater than `bound`.
pub fn greater_than(bound: impl Into<Value>) -> Def {
    comparator("greater_than", ErrorCode::GtFailed, bound.into(), |n, b| n > b)
}

/// Passes iff the input is a number strictly less than `bound`.
pub fn less_than(bound: impl Into<Value>) -> Def {
    comparator("less_than", ErrorCode::LtFailed, bound.into(), |n, b| n < b)
}

/// Passes iff the input is a number greater than or equal to `bound`.
pub fn greater_than_equal(bound: impl Into<Value>) -> Def {
    comparator("greater_than_equal", ErrorCode::GteFailed, bound.into(), |n, b| n >= b)
}

/// Passes iff the input is a number less than or equal to `bound`.
pub fn less_than_equal(bound: impl Into<Value>) -> Def {
    comparator("less_than_equal", ErrorCode::LteFailed, bound.into(), |n, b| n <= b)
}
