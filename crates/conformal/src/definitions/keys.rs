//! KEYS - the record validator.
//!
//! A record definition accumulates field specs (`required` / `optional`,
//! optionally with a default), an extra-key policy, and `include` merges
//! from other record definitions. All of that is resolved at build time;
//! conforming is a single pass over the input mapping.
//!
//! ```rust
//! use conformal::prelude::*;
//!
//! let address = keys()
//!     .required("street", value_type(ValueKind::Text))
//!     .build()
//!     .unwrap();
//!
//! let person = keys()
//!     .required("name", non_empty_string())
//!     .optional_default("admin", value_type(ValueKind::Bool), false)
//!     .required("address", address.into_def())
//!     .build()
//!     .unwrap();
//! ```

use jsonptr::Token;
use tracing::{debug, trace};

use crate::definitions::{Def, Definition};
use crate::error::{ConfigError, ConformError, ErrorCode};
use crate::result::ConformResult;
use crate::value::{Key, Value, ValueMap};

// ============================================================================
// KEY SPEC
// ============================================================================

/// One declared field of a record definition.
///
/// Required specs never carry a default; the builder API cannot express the
/// combination.
#[derive(Debug, Clone)]
pub struct KeySpec {
    key: Key,
    def: Def,
    required: bool,
    default: Option<Value>,
}

impl KeySpec {
    /// The declared key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The field's definition.
    pub fn definition(&self) -> &Def {
        &self.def
    }

    /// Whether the field must be present.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The default emitted when an optional field is absent.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

// ============================================================================
// KEYS
// ============================================================================

/// Record validator over keyed mappings.
///
/// Built through [`KeysBuilder`]; immutable afterwards. Conforming produces
/// a **fresh** mapping containing only the declared keys that were present
/// (conformed) plus injected defaults, in declaration order.
#[derive(Debug, Clone)]
pub struct Keys {
    specs: Vec<KeySpec>,
    ignore_extra_keys: bool,
}

impl Keys {
    /// Starts an empty record builder.
    pub fn builder() -> KeysBuilder {
        KeysBuilder::default()
    }

    /// The declared field specs, in declaration order.
    pub fn specs(&self) -> &[KeySpec] {
        &self.specs
    }

    /// The declared keys, in declaration order.
    ///
    /// This is the surface a value-object wrapper consumes to synthesize
    /// per-key accessors.
    pub fn declared_keys(&self) -> impl Iterator<Item = &Key> {
        self.specs.iter().map(KeySpec::key)
    }

    fn spec_for(&self, key: &Key) -> Option<&KeySpec> {
        self.specs.iter().find(|spec| spec.key == *key)
    }
}

impl Definition for Keys {
    fn name(&self) -> &str {
        "keys"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let Some(input) = value.as_map() else {
            return ConformResult::fail(
                ConformError::new(ErrorCode::NotAMapping).with_arg(value.kind()),
            );
        };

        let mut errors = Vec::new();

        // Extra keys first: anything in the input no spec declares,
        // including same-named keys of the other key type.
        if !self.ignore_extra_keys {
            for key in input.keys() {
                if self.spec_for(key).is_none() {
                    errors.push(
                        ConformError::new(ErrorCode::UnexpectedKey)
                            .with_arg(key)
                            .prefixed(Token::new(key.name().to_owned())),
                    );
                }
            }
        }
        trace!(
            declared = self.specs.len(),
            input = input.len(),
            "conforming record"
        );

        let mut out = ValueMap::with_capacity(self.specs.len());
        for spec in &self.specs {
            let token = Token::new(spec.key.name().to_owned());
            match input.get(&spec.key) {
                Some(present) => match spec.def.conform(present) {
                    ConformResult::Passed(conformed) => {
                        out.insert(spec.key.clone(), conformed);
                    }
                    ConformResult::Failed(child_errors) => {
                        let rebased: Vec<_> = child_errors
                            .into_iter()
                            .map(|e| e.prefixed(token.clone()))
                            .collect();
                        errors.push(
                            ConformError::new(ErrorCode::KeyFailed)
                                .with_arg(&spec.key)
                                .with_nested(rebased)
                                .prefixed(token),
                        );
                    }
                },
                None if spec.required => {
                    errors.push(
                        ConformError::new(ErrorCode::MissingKey)
                            .with_arg(&spec.key)
                            .prefixed(token),
                    );
                }
                None => {
                    // Defaults are emitted verbatim, never re-validated.
                    if let Some(default) = &spec.default {
                        out.insert(spec.key.clone(), default.clone());
                    }
                }
            }
        }

        if errors.is_empty() {
            ConformResult::Passed(Value::Map(out))
        } else {
            ConformResult::fail_all(errors)
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Accumulates field specs, options and includes for a [`Keys`] definition.
///
/// Duplicate keys, whether declared directly or brought in by
/// [`include`](Self::include), surface as [`ConfigError`]s from
/// [`build`](Self::build).
#[derive(Debug, Default, Clone)]
pub struct KeysBuilder {
    specs: Vec<KeySpec>,
    included: Vec<KeySpec>,
    ignore_extra_keys: bool,
}

impl KeysBuilder {
    /// Declares a required field.
    pub fn required(mut self, key: impl Into<Key>, def: Def) -> Self {
        self.specs.push(KeySpec {
            key: key.into(),
            def,
            required: true,
            default: None,
        });
        self
    }

    /// Declares an optional field without a default: absent means absent
    /// from the output too.
    pub fn optional(mut self, key: impl Into<Key>, def: Def) -> Self {
        self.specs.push(KeySpec {
            key: key.into(),
            def,
            required: false,
            default: None,
        });
        self
    }

    /// Declares an optional field with a default injected verbatim when the
    /// key is absent. The default is not validated against `def`.
    pub fn optional_default(
        mut self,
        key: impl Into<Key>,
        def: Def,
        default: impl Into<Value>,
    ) -> Self {
        self.specs.push(KeySpec {
            key: key.into(),
            def,
            required: false,
            default: Some(default.into()),
        });
        self
    }

    /// Drops extra input keys from the output silently instead of failing
    /// on them.
    pub fn ignore_extra_keys(mut self) -> Self {
        self.ignore_extra_keys = true;
        self
    }

    /// Merges another record's field specs into this one, as if they had
    /// been declared inline at this position. Options are not merged.
    pub fn include(mut self, other: &Keys) -> Self {
        self.included.extend(other.specs.iter().cloned());
        self.specs.extend(other.specs.iter().cloned());
        self
    }

    /// Builds the record definition.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateKey`] when a key is declared twice directly;
    /// [`ConfigError::IncludeCollision`] when an include collides with any
    /// other declaration.
    pub fn build(self) -> Result<Keys, ConfigError> {
        for (i, spec) in self.specs.iter().enumerate() {
            if self.specs[..i].iter().any(|seen| seen.key == spec.key) {
                let key = spec.key.name().to_owned();
                if self.included.iter().any(|inc| inc.key == spec.key) {
                    return Err(ConfigError::IncludeCollision { key });
                }
                return Err(ConfigError::DuplicateKey { key });
            }
        }
        debug!(fields = self.specs.len(), "built record definition");
        Ok(Keys {
            specs: self.specs,
            ignore_extra_keys: self.ignore_extra_keys,
        })
    }
}

/// Starts an empty record builder.
pub fn keys() -> KeysBuilder {
    Keys::builder()
}
