// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category normalization.
//!
//! A raw category string on a transaction is turned into a `(major, sub)`
//! pair. Explicitly hierarchical labels (`"Major > Sub"`) are taken as-is,
//! single labels go through the label -> major table, and everything else
//! lands in the fallback bucket.

use std::collections::BTreeMap;

use serde::Serialize;

pub const HIERARCHY_SEPARATOR: char = '>';
pub const DEFAULT_FALLBACK: &str = "Other";

/// Built-in label -> major table. Settings may extend or override it.
pub const BUILTIN_MAJOR_MAP: &[(&str, &str)] = &[
    ("아침", "식비"),
    ("점심", "식비"),
    ("저녁", "식비"),
    ("간식", "식비"),
    ("야식", "식비"),
    ("음료", "식비"),
    ("외식", "식비"),
    ("버스", "교통"),
    ("지하철", "교통"),
    ("택시", "교통"),
    ("마트", "생활"),
    ("편의점", "생활"),
    ("생활용품", "생활"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedCategory {
    pub major: String,
    pub sub: String,
}

#[derive(Debug, Clone)]
pub struct CategoryResolver {
    table: BTreeMap<String, String>,
    fallback: String,
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(builtin_table(), DEFAULT_FALLBACK)
    }
}

pub fn builtin_table() -> BTreeMap<String, String> {
    BUILTIN_MAJOR_MAP
        .iter()
        .map(|(label, major)| (label.to_string(), major.to_string()))
        .collect()
}

impl CategoryResolver {
    /// Keys are matched exactly (case and inner whitespace included). A blank
    /// fallback is replaced with [`DEFAULT_FALLBACK`] so every resolution
    /// yields non-empty names.
    pub fn new(table: BTreeMap<String, String>, fallback: &str) -> Self {
        let fallback = match fallback.trim() {
            "" => DEFAULT_FALLBACK.to_string(),
            f => f.to_string(),
        };
        let table = table
            .into_iter()
            .filter(|(label, major)| !label.trim().is_empty() && !major.trim().is_empty())
            .map(|(label, major)| (label, major.trim().to_string()))
            .collect();
        Self { table, fallback }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn table(&self) -> &BTreeMap<String, String> {
        &self.table
    }

    pub fn resolve(&self, raw: Option<&str>) -> ResolvedCategory {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        let label = if trimmed.is_empty() {
            self.fallback.as_str()
        } else {
            trimmed
        };

        if let Some((major, sub)) = label.split_once(HIERARCHY_SEPARATOR) {
            return ResolvedCategory {
                major: self.or_fallback(major),
                sub: self.or_fallback(sub),
            };
        }

        match self.table.get(label) {
            Some(major) => ResolvedCategory {
                major: major.clone(),
                sub: label.to_string(),
            },
            None => ResolvedCategory {
                major: self.fallback.clone(),
                sub: label.to_string(),
            },
        }
    }

    fn or_fallback(&self, part: &str) -> String {
        match part.trim() {
            "" => self.fallback.clone(),
            p => p.to_string(),
        }
    }
}
