//! Works out which VocExcel template a workbook was filled in from.

use crate::errors::UnknownTemplateError;
use crate::usage_error;
use crate::workbook::Workbook;
use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize, Default,
)]
pub enum TemplateVersion {
    #[serde(rename = "0.2.1")]
    V021,
    #[serde(rename = "0.3.0")]
    V030,
    #[serde(rename = "0.4.0")]
    V040,
    #[serde(rename = "0.4.1")]
    V041,
    #[serde(rename = "0.4.2")]
    V042,
    #[serde(rename = "0.4.3")]
    V043,
    #[serde(rename = "0.4.4")]
    V044,
    #[serde(rename = "0.5.0")]
    V050,
    #[serde(rename = "0.6.0")]
    V060,
    #[serde(rename = "0.6.1")]
    V061,
    #[serde(rename = "0.6.2")]
    V062,
    #[serde(rename = "0.6.3")]
    V063,
    #[serde(rename = "0.7.0")]
    V070,
    #[serde(rename = "0.7.1")]
    V071,
    /// The latest template, and the one graphs are written into by default.
    #[serde(rename = "0.8.0")]
    #[default]
    V080,
    #[serde(rename = "0.8.0.GA")]
    V080GA,
}

impl TemplateVersion {
    pub const ALL: [TemplateVersion; 16] = [
        TemplateVersion::V021,
        TemplateVersion::V030,
        TemplateVersion::V040,
        TemplateVersion::V041,
        TemplateVersion::V042,
        TemplateVersion::V043,
        TemplateVersion::V044,
        TemplateVersion::V050,
        TemplateVersion::V060,
        TemplateVersion::V061,
        TemplateVersion::V062,
        TemplateVersion::V063,
        TemplateVersion::V070,
        TemplateVersion::V071,
        TemplateVersion::V080,
        TemplateVersion::V080GA,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateVersion::V021 => "0.2.1",
            TemplateVersion::V030 => "0.3.0",
            TemplateVersion::V040 => "0.4.0",
            TemplateVersion::V041 => "0.4.1",
            TemplateVersion::V042 => "0.4.2",
            TemplateVersion::V043 => "0.4.3",
            TemplateVersion::V044 => "0.4.4",
            TemplateVersion::V050 => "0.5.0",
            TemplateVersion::V060 => "0.6.0",
            TemplateVersion::V061 => "0.6.1",
            TemplateVersion::V062 => "0.6.2",
            TemplateVersion::V063 => "0.6.3",
            TemplateVersion::V070 => "0.7.0",
            TemplateVersion::V071 => "0.7.1",
            TemplateVersion::V080 => "0.8.0",
            TemplateVersion::V080GA => "0.8.0.GA",
        }
    }

    /// Version tokens, newest first.
    pub fn known_tokens_descending() -> Vec<&'static str> {
        TemplateVersion::ALL
            .iter()
            .rev()
            .map(|v| v.as_str())
            .collect()
    }

    /// The cell carrying this version's marker: (sheet, column, row).
    pub fn marker_cell(self) -> (&'static str, &'static str, u32) {
        use TemplateVersion::*;
        match self {
            V021 | V030 => ("program info", "B", 2),
            V040 | V041 | V042 | V043 | V044 | V050 | V060 | V061 => ("Introduction", "J", 11),
            V062 | V063 | V070 | V071 => ("Introduction", "C", 6),
            V080 | V080GA => ("Introduction", "E", 4),
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateVersion {
    type Err = UnknownTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        TemplateVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == token)
            .ok_or_else(|| UnknownTemplateError {
                found: Some(token.to_string()),
            })
    }
}

/// Marker cells in the order they are checked.
const MARKER_CELLS: [(&str, &str, u32); 4] = [
    ("program info", "B", 2),
    ("Introduction", "J", 11),
    ("Introduction", "C", 6),
    ("Introduction", "E", 4),
];

/// Returns the version of the first marker cell holding a known version token.
pub fn get_template_version(workbook: &Workbook) -> Result<TemplateVersion> {
    let mut last_seen: Option<String> = None;
    for (sheet_name, column, row) in MARKER_CELLS {
        let Ok(sheet) = workbook.sheet(sheet_name) else {
            continue;
        };
        let Some(text) = sheet.text(column, row) else {
            continue;
        };
        match text.parse::<TemplateVersion>() {
            Ok(version) => {
                info!("Detected template version {version}");
                return Ok(version);
            }
            Err(_) => {
                debug!("{sheet_name}!{column}{row} holds '{text}', not a version token");
                last_seen.get_or_insert(text);
            }
        }
    }
    Err(anyhow::Error::new(UnknownTemplateError { found: last_seen }))
}

/// Fails when a caller restricted the versions it will accept and `version` is
/// not among them.
pub fn check_allowed(version: TemplateVersion, allowed: Option<&[TemplateVersion]>) -> Result<()> {
    match allowed {
        Some(allowed) if !allowed.contains(&version) => Err(usage_error!(
            "You have restricted the allowed template versions to {} but supplied a template of version {}",
            allowed
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            version
        )),
        _ => Ok(()),
    }
}
