// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::aggregate::{in_month, sanitize_amount};
use crate::error::LedgerError;
use crate::models::{Transaction, TxType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TxType),
}

impl TypeFilter {
    fn admits(&self, kind: TxType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == kind,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<TxType>().map(TypeFilter::Only)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub month: Option<String>,
    pub date: Option<NaiveDate>,
    pub type_filter: TypeFilter,
    /// Substring matched against category or memo, case-sensitive.
    pub query: Option<String>,
}

impl SearchFilter {
    fn matches(&self, tx: &Transaction) -> bool {
        if let Some(month) = &self.month {
            if !in_month(tx, month) {
                return false;
            }
        }
        if self.date.is_some_and(|d| d != tx.date) {
            return false;
        }
        if !self.type_filter.admits(tx.r#type) {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                tx.category.as_deref().unwrap_or_default().contains(q)
                    || tx.memo.as_deref().unwrap_or_default().contains(q)
            }
        }
    }
}

/// Matching transactions, newest date first; same-day order is preserved.
pub fn search<'t>(transactions: &'t [Transaction], filter: &SearchFilter) -> Vec<&'t Transaction> {
    let mut hits: Vec<&Transaction> = transactions.iter().filter(|t| filter.matches(t)).collect();
    hits.sort_by(|a, b| b.date.cmp(&a.date));
    hits
}

/// Income minus expense over the given transactions.
pub fn signed_total<'t>(transactions: impl IntoIterator<Item = &'t Transaction>) -> Decimal {
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, tx| match tx.r#type {
            TxType::Income => acc.saturating_add(sanitize_amount(tx.amount)),
            TxType::Expense => acc.saturating_sub(sanitize_amount(tx.amount)),
        })
}
