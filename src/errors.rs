// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("not authorized: check the access token")]
    Unauthorized,
    #[error("forbidden: the backend refused access to this row")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("query failed ({status}): {message}")]
    Query { status: u16, message: String },
    #[error("could not decode backend response: {0}")]
    Decode(String),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Map a non-success HTTP status plus the raw body to an error.
    ///
    /// PostgREST error bodies look like `{"code":..,"message":..,"details":..,"hint":..}`;
    /// the `message` field is used when present, otherwise the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "unknown error".to_string()
                } else {
                    trimmed.to_string()
                }
            });
        match status {
            401 => BackendError::Unauthorized,
            403 => BackendError::Forbidden,
            404 => BackendError::NotFound,
            409 => BackendError::Conflict(message),
            _ => BackendError::Query { status, message },
        }
    }
}

/// Malformed user input, caught before any store call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(String),
    #[error("amount '{0}' has more than two decimal places")]
    TooManyDecimals(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid type '{0}', expected income or expense")]
    InvalidType(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("category '{0}' not found")]
    UnknownCategory(String),
    #[error("category '{0}' exists for both income and expense, pass --type to choose")]
    AmbiguousCategory(String),
    #[error("category '{name}' is a {category} category, cannot be used for {transaction}")]
    CategoryTypeMismatch {
        name: String,
        category: String,
        transaction: String,
    },
    #[error("nothing to update")]
    EmptyPatch,
    #[error("invalid month window {0}, expected 6 or 12")]
    InvalidMonths(usize),
}

/// Either kind, for calls that validate before they reach the backend.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
