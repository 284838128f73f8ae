//! Message templates and locale lookup.
//!
//! Errors store only `(key, args)`; templates are resolved here when a
//! message is actually requested. A template is plain text with positional
//! `{0}`, `{1}`, … placeholders.
//!
//! The engine ships an English table and keeps a process-wide registry
//! behind an `RwLock`: read-mostly after load, with per-key registration
//! remaining atomic for collaborators that load locale files late. Loading
//! itself (files, search paths) is the collaborator's job; the engine only
//! accepts tables and keys.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::debug;

/// The locale used by `Display` renderings and fallbacks.
pub const DEFAULT_LOCALE: &str = "en";

// ============================================================================
// TRANSLATION TABLE
// ============================================================================

/// A `(locale, key) → template` table.
///
/// Tables are plain data and can be built by any loader, then either passed
/// around by reference or installed into the process-wide registry with
/// [`install`].
#[derive(Debug, Clone, Default)]
pub struct Translations {
    templates: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table pre-populated with the built-in English templates.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (key, template) in EN_TEMPLATES {
            table.register(DEFAULT_LOCALE, *key, *template);
        }
        table
    }

    /// Registers one template, replacing any previous one for the same
    /// `(locale, key)` pair.
    pub fn register(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.templates
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Looks up the template for `(locale, key)`, without fallback.
    pub fn template(&self, locale: &str, key: &str) -> Option<&str> {
        self.templates
            .get(locale)?
            .get(key)
            .map(String::as_str)
    }

    /// Renders `key` for `locale`: the locale's template, else the default
    /// locale's, else the key name with its argument list.
    pub fn render(&self, locale: &str, key: &str, args: &[String]) -> String {
        self.template(locale, key)
            .or_else(|| self.template(DEFAULT_LOCALE, key))
            .map_or_else(|| fallback(key, args), |template| substitute(template, args))
    }
}

/// Substitutes positional `{n}` placeholders.
fn substitute(template: &str, args: &[String]) -> String {
    let mut out = template.to_owned();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// No template anywhere: key name plus argument list.
fn fallback(key: &str, args: &[String]) -> String {
    if args.is_empty() {
        key.to_owned()
    } else {
        format!("{key} ({})", args.join(", "))
    }
}

// ============================================================================
// PROCESS-WIDE REGISTRY
// ============================================================================

static REGISTRY: Lazy<RwLock<Translations>> =
    Lazy::new(|| RwLock::new(Translations::with_defaults()));

/// Registers one template in the process-wide registry.
pub fn register(locale: &str, key: &str, template: &str) {
    debug!(locale, key, "registering translation");
    REGISTRY
        .write()
        .expect("translation registry poisoned")
        .register(locale, key, template);
}

/// Merges a whole table into the process-wide registry.
pub fn install(table: &Translations) {
    let mut registry = REGISTRY.write().expect("translation registry poisoned");
    for (locale, templates) in &table.templates {
        for (key, template) in templates {
            registry.register(locale.clone(), key.clone(), template.clone());
        }
    }
}

/// Renders `key` for `locale` against the process-wide registry.
pub fn translate(locale: &str, key: &str, args: &[String]) -> String {
    REGISTRY
        .read()
        .expect("translation registry poisoned")
        .render(locale, key, args)
}

// ============================================================================
// BUILT-IN ENGLISH TEMPLATES
// ============================================================================

const EN_TEMPLATES: &[(&str, &str)] = &[
    ("type_error", "expected {0}, got {1}"),
    ("coercion_error", "cannot coerce {1} to {0}"),
    ("and_failed", "'{0}' did not conform"),
    ("or_failed", "none of the alternatives of '{0}' matched"),
    ("each_failed", "{0} element(s) did not conform"),
    ("key_failed", "value at '{0}' does not conform"),
    ("missing_key", "required key '{0}' is missing"),
    ("unexpected_key", "unexpected key '{0}'"),
    ("not_a_mapping", "expected a mapping, got {0}"),
    ("not_a_sequence", "expected a sequence, got {0}"),
    ("enum_failed", "value is not one of {0}"),
    ("equal_failed", "value does not equal {0}"),
    ("nil_failed", "value is not nil"),
    ("boolean_failed", "value is not a boolean"),
    ("size_min", "size must be at least {0}"),
    ("size_max", "size must be at most {0}"),
    ("regex_failed", "value does not match {0}"),
    ("gt_failed", "value must be greater than {0}"),
    ("lt_failed", "value must be less than {0}"),
    ("gte_failed", "value must be greater than or equal to {0}"),
    ("lte_failed", "value must be less than or equal to {0}"),
    ("lambda_failed", "'{0}' did not conform"),
];
