// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "INCOME",
            TxType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(TxType::Income),
            "EXPENSE" => Ok(TxType::Expense),
            other => Err(LedgerError::Validation(format!(
                "Invalid transaction type '{}', expected INCOME or EXPENSE",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub r#type: TxType,
    pub category: Option<String>,
    pub memo: Option<String>,
    pub amount: Decimal, // base currency, never negative once sanitized
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.r#type == TxType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TxType::Income
    }
}

/// A transaction as submitted by a user, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub r#type: TxType,
    pub category: Option<String>,
    pub memo: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub kind: TxType,
    pub name: String,
    pub built_in: bool,
}
