// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User settings loaded from `config.json` in the data directory.
//!
//! Every field is optional in the file. `category_map` entries are merged
//! over the built-in label table; mapping a label to an empty string removes
//! the built-in entry for it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db;
use crate::engine::calendar::WeekStart;
use crate::engine::resolver::{builtin_table, CategoryResolver, DEFAULT_FALLBACK};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fallback_label: String,
    pub category_map: BTreeMap<String, String>,
    pub alert_top_n: usize,
    pub week_starts_on: WeekStart,
    pub currency_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_label: DEFAULT_FALLBACK.to_string(),
            category_map: BTreeMap::new(),
            alert_top_n: 3,
            week_starts_on: WeekStart::Sunday,
            currency_label: "원".to_string(),
        }
    }
}

impl Settings {
    /// A missing file means defaults; an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!(
            path = %path.display(),
            overrides = settings.category_map.len(),
            "loaded config"
        );
        Ok(settings)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&db::data_dir()?.join(CONFIG_FILE))
    }

    pub fn mapping_table(&self) -> BTreeMap<String, String> {
        let mut table = builtin_table();
        for (label, major) in &self.category_map {
            if major.trim().is_empty() {
                table.remove(label);
            } else {
                table.insert(label.clone(), major.clone());
            }
        }
        table
    }

    pub fn resolver(&self) -> CategoryResolver {
        CategoryResolver::new(self.mapping_table(), &self.fallback_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(s.fallback_label, "Other");
        assert_eq!(s.alert_top_n, 3);
        assert_eq!(s.week_starts_on, WeekStart::Sunday);
    }

    #[test]
    fn partial_file_merges_with_builtin_table() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"fallback_label":"기타","category_map":{{"커피":"식비","택시":""}},"week_starts_on":"monday"}}"#
        )
        .unwrap();
        let s = Settings::load_from(file.path()).unwrap();
        assert_eq!(s.week_starts_on, WeekStart::Monday);
        assert_eq!(s.alert_top_n, 3);

        let r = s.resolver();
        assert_eq!(r.resolve(Some("커피")).major, "식비");
        assert_eq!(r.resolve(Some("버스")).major, "교통");
        assert_eq!(r.resolve(Some("택시")).major, "기타");
        assert_eq!(r.resolve(None).sub, "기타");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
