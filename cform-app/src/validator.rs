// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    email::is_valid_email,
    field::{FieldMap, FieldValue},
    sanitize::sanitize,
};
use std::{collections::BTreeMap, fmt};

/// The fields of the contact form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All known fields, in validation order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// The HTML form field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Rule {
    /// Minimum number of characters after sanitizing.
    MinChars(usize),
    /// Must be a well formed email address.
    Email,
}

/// Validation rules for a single form field.
#[derive(Clone, Copy, Debug)]
pub struct FieldValidator {
    rule: Rule,
    /// Error text for an empty or missing value.
    msg_required: &'static str,
    /// Error text for a value failing the [Rule].
    msg_invalid: &'static str,
}

/// Outcome of validating one field.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldOutcome {
    pub value: String,
    pub error: Option<&'static str>,
}

impl FieldValidator {
    pub fn for_field(field: Field) -> Self {
        match field {
            Field::Name => Self {
                rule: Rule::MinChars(2),
                msg_required: "Il nome è obbligatorio.",
                msg_invalid: "Il nome è obbligatorio e deve contenere almeno 2 caratteri.",
            },
            Field::Email => Self {
                rule: Rule::Email,
                msg_required: "Inserisci una email valida.",
                msg_invalid: "Inserisci una email valida.",
            },
            Field::Message => Self {
                rule: Rule::MinChars(10),
                msg_required: "Il messaggio è obbligatorio.",
                msg_invalid: "Il messaggio deve contenere almeno 10 caratteri.",
            },
        }
    }

    /// Sanitize and validate a raw submitted value.
    ///
    /// The sanitized value is always returned, even if validation fails.
    pub fn validate(&self, raw: Option<&FieldValue>) -> FieldOutcome {
        let value = sanitize(raw);
        let error = if value.is_empty() {
            Some(self.msg_required)
        } else if !self.rule_passes(&value) {
            Some(self.msg_invalid)
        } else {
            None
        };
        FieldOutcome { value, error }
    }

    fn rule_passes(&self, value: &str) -> bool {
        match self.rule {
            Rule::MinChars(min) => value.chars().count() >= min,
            Rule::Email => is_valid_email(value),
        }
    }
}

/// The sanitized values of all known fields.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }
}

/// Error messages of all failed fields.
pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ValidationResult {
    pub data: FormData,
    pub errors: FieldErrors,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validator for the complete contact form.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContactFormValidator;

impl ContactFormValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate all known fields. Unknown fields are ignored.
    ///
    /// All failing fields are reported at once.
    pub fn validate(&self, fields: &FieldMap) -> ValidationResult {
        let mut result = ValidationResult::default();
        for field in Field::ALL {
            let outcome = FieldValidator::for_field(field).validate(fields.get(field.as_str()));
            if let Some(error) = outcome.error {
                result.errors.insert(field, error);
            }
            result.data.set(field, outcome.value);
        }
        tracing::debug!(
            failed = ?result.errors.keys().collect::<Vec<_>>(),
            "Contact form validated"
        );
        result
    }
}


// vim: ts=4 sw=4 expandtab
