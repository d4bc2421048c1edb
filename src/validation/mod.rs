//! Declarative form validation
//!
//! A [`Schema`] maps field names to an ordered list of checks. Each field is
//! evaluated independently and every failing check contributes its message,
//! so a form can show per-field errors while the aggregate gates submission.

pub mod login;
pub mod profile;
pub mod rules;

use serde::Serialize;
use std::collections::BTreeMap;

pub use login::login_schema;
pub use profile::{profile_schema, validate_profile};

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// One predicate and the message shown when it fails
pub struct Check<T> {
    predicate: Predicate<T>,
    message: &'static str,
}

/// Ordered checks bound to a single form field
pub struct FieldRule<T> {
    field: &'static str,
    checks: Vec<Check<T>>,
}

impl<T> FieldRule<T> {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
        }
    }

    pub fn check(
        mut self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        message: &'static str,
    ) -> Self {
        self.checks.push(Check {
            predicate: Box::new(predicate),
            message,
        });
        self
    }

    fn failures(&self, value: &T) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| !(c.predicate)(value))
            .map(|c| c.message.to_string())
            .collect()
    }
}

/// Field-scoped validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<_> = self.fields().collect();
        write!(f, "validation failed for: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// All messages for a field, in check order
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The message a form shows next to the field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    fn single(field: &'static str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.insert(field, vec![message.to_string()]);
        errors
    }

    fn insert(&mut self, field: &'static str, messages: Vec<String>) {
        if !messages.is_empty() {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

/// A per-field constraint set over a form value
pub struct Schema<T> {
    rules: Vec<FieldRule<T>>,
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn field(mut self, rule: FieldRule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn validate(&self, value: &T) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for rule in &self.rules {
            errors.insert(rule.field, rule.failures(value));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self, value: &T) -> bool {
        self.validate(value).is_ok()
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}
