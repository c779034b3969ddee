// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Built-in category vocabulary and hierarchical label composition.

use crate::models::TxType;

pub const EXPENSE_LABELS: &[&str] = &[
    "식비",
    "카페/간식",
    "교통",
    "쇼핑",
    "취미/여가",
    "주거/공과금",
    "여행",
    "교육",
    "의료",
    "기타",
];

pub const INCOME_LABELS: &[&str] = &["급여", "용돈", "보너스", "투자", "환급", "기타"];

pub const EXPENSE_TREE: &[(&str, &[&str])] = &[
    ("식비", &["식사", "간식", "카페/음료"]),
    ("교통", &["대중교통", "택시", "주유"]),
    ("생활", &["편의점", "생활용품"]),
    ("고정비", &["주거/통신", "구독", "보험"]),
    ("기타", &["기타"]),
];

pub const INCOME_TREE: &[(&str, &[&str])] = &[
    ("급여", &["기본급", "보너스"]),
    ("용돈", &["부모님", "용돈/기타"]),
    ("환급", &["세금환급", "캐시백"]),
    ("기타", &["기타"]),
];

pub fn builtin_labels(kind: TxType) -> &'static [&'static str] {
    match kind {
        TxType::Expense => EXPENSE_LABELS,
        TxType::Income => INCOME_LABELS,
    }
}

pub fn tree(kind: TxType) -> &'static [(&'static str, &'static [&'static str])] {
    match kind {
        TxType::Expense => EXPENSE_TREE,
        TxType::Income => INCOME_TREE,
    }
}

pub fn sub_options(kind: TxType, major: &str) -> &'static [&'static str] {
    tree(kind)
        .iter()
        .find(|(m, _)| *m == major)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

/// Free text wins over the picked pair; otherwise the non-empty parts are
/// joined as `"Major > Sub"`.
pub fn compose_label(
    major: Option<&str>,
    sub: Option<&str>,
    custom: Option<&str>,
) -> Option<String> {
    if let Some(c) = custom.map(str::trim).filter(|c| !c.is_empty()) {
        return Some(c.to_string());
    }
    let parts: Vec<&str> = [major, sub]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_prefers_custom_text() {
        assert_eq!(
            compose_label(Some("식비"), Some("식사"), Some(" 회식 ")),
            Some("회식".to_string())
        );
    }

    #[test]
    fn compose_joins_pair() {
        assert_eq!(
            compose_label(Some("교통"), Some("택시"), None),
            Some("교통 > 택시".to_string())
        );
        assert_eq!(compose_label(Some("교통"), Some(" "), Some("")), Some("교통".to_string()));
        assert_eq!(compose_label(None, None, Some("  ")), None);
    }

    #[test]
    fn sub_options_follow_tree() {
        assert_eq!(sub_options(TxType::Expense, "교통"), ["대중교통", "택시", "주유"]);
        assert!(sub_options(TxType::Income, "교통").is_empty());
    }

    #[test]
    fn builtin_labels_by_kind() {
        assert_eq!(builtin_labels(TxType::Expense).len(), 10);
        assert!(builtin_labels(TxType::Income).contains(&"급여"));
    }
}
