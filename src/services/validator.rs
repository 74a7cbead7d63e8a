//! Book validation rules

use validator::{Validate, ValidationError};

use crate::models::{Book, ValidationFailure};

/// Fields in the order their rules are declared on [`Book`].
const RULE_ORDER: [&str; 5] = ["isbn", "title", "short_description", "page_count", "author"];

/// Stateless validator for submitted books.
///
/// Every rule is evaluated, so one call reports all failing fields.
#[derive(Clone, Default)]
pub struct BookValidator;

impl BookValidator {
    pub fn new() -> Self {
        Self
    }

    /// Returns the rule violations for `book`; empty means valid.
    pub fn validate(&self, book: &Book) -> Vec<ValidationFailure> {
        let Err(errors) = book.validate() else {
            return Vec::new();
        };

        let mut failures: Vec<(usize, ValidationFailure)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                let rank = RULE_ORDER
                    .iter()
                    .position(|f| *f == field)
                    .unwrap_or(RULE_ORDER.len());
                field_errors
                    .iter()
                    .map(|error| (rank, to_failure(&field, error)))
                    .collect::<Vec<_>>()
            })
            .collect();

        failures.sort_by_key(|(rank, _)| *rank);
        failures.into_iter().map(|(_, failure)| failure).collect()
    }
}

fn to_failure(field: &str, error: &ValidationError) -> ValidationFailure {
    let message = match &error.message {
        Some(message) => message.to_string(),
        None => default_message(field, &error.code),
    };
    ValidationFailure::new(camel_case(field), message)
}

fn default_message(field: &str, code: &str) -> String {
    let display = pascal_case(field);
    match code {
        "not_empty" => format!("'{}' must not be empty.", display),
        "range" => format!("'{}' must be greater than '0'.", display),
        _ => format!("'{}' is not valid.", display),
    }
}

fn pascal_case(field: &str) -> String {
    field
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let pascal = pascal_case(field);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => pascal,
    }
}
