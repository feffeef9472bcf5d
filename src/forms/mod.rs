//! Form layer: syntactic field rules and the per-form error map. Rules never
//! talk to the network; a field that fails blocks submission.

use regex::Regex;
use std::collections::BTreeMap;

/// Key for errors that belong to the whole submission rather than a field.
pub const SUBMIT: &str = "submit";

#[derive(Clone, Debug)]
pub enum Rule {
    Required(&'static str),
    /// Compiled once by the caller; `Regex` clones share the compiled program.
    Pattern {
        regex: Regex,
        message: &'static str,
    },
    MinLength {
        min: usize,
        message: &'static str,
    },
}

impl Rule {
    fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Rule::Required(message) => value.is_empty().then_some(*message),
            // Optional fields skip the remaining rules when empty.
            Rule::Pattern { .. } | Rule::MinLength { .. } if value.is_empty() => None,
            Rule::Pattern { regex, message } => (!regex.is_match(value)).then_some(*message),
            Rule::MinLength { min, message } => (value.chars().count() < *min).then_some(*message),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl Field {
    #[must_use]
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    /// Message of the first rule `value` fails, if any.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<&'static str> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }
}

/// Errors keyed by field name, plus [`SUBMIT`] for submission-level errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when any field other than [`SUBMIT`] has an error.
    #[must_use]
    pub fn has_field_errors(&self) -> bool {
        self.errors.keys().any(|key| key != SUBMIT)
    }
}

/// Runs every `(field, value)` pair and collects the first failure per field.
#[must_use]
pub fn validate(fields: &[(&Field, &str)]) -> FormErrors {
    let mut errors = FormErrors::default();
    for (field, value) in fields {
        if let Some(message) = field.check(value) {
            errors.set(field.name, message);
        }
    }
    errors
}
