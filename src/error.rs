// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Domain errors raised by the stores and input parsing.
//!
//! The aggregation engine itself never fails; these only surface where user
//! input or persisted records are checked.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("Built-in category '{0}' cannot be removed")]
    BuiltInCategory(String),
}

impl LedgerError {
    pub fn transaction_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Transaction",
            identifier: id.into(),
        }
    }

    pub fn category_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Category",
            identifier: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = LedgerError::transaction_not_found("abc");
        assert_eq!(err.to_string(), "Transaction not found: abc");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn built_in_display() {
        let err = LedgerError::BuiltInCategory("식비".into());
        assert_eq!(err.to_string(), "Built-in category '식비' cannot be removed");
    }
}
