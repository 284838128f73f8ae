//! Conforming a signup form end to end.
//!
//! Run with: cargo run --example signup_form -p conformal

use conformal::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Conformal - Signup Form ===\n");

    let signup = keys()
        .required("username", and("username", [non_empty_string(), max_size(20)])?)
        .required("email", matches(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?)
        .required(
            "age",
            and("age", [coercible_type(ValueKind::Int)?, greater_than_equal(18)])?,
        )
        .optional_default("newsletter", value_type(ValueKind::Bool), false)
        .ignore_extra_keys()
        .build()?;

    // A good submission: the age arrives as text and is coerced, the
    // newsletter flag is defaulted, the tracking key is dropped.
    let input = Value::map([
        (Key::sym("username"), Value::text("ada")),
        (Key::sym("email"), Value::text("ada@example.com")),
        (Key::sym("age"), Value::text("36")),
        (Key::sym("utm_source"), Value::text("banner")),
    ]);
    let result = signup.conform(&input);
    println!("valid submission  → {}", result.value());

    // A bad one: every field error is addressed by its JSON-Pointer path.
    let input = Value::map([
        (Key::sym("username"), Value::text("")),
        (Key::sym("email"), Value::text("not-an-email")),
        (Key::sym("age"), Value::text("seventeen")),
    ]);
    let result = signup.conform(&input);
    println!("\ninvalid submission:");
    for (field, errors) in result.error_hash() {
        for error in errors {
            println!("  {:12} {}", field, error.translated_error("en"));
        }
    }
    println!("\nsummary: {}", result.error_message());

    Ok(())
}
