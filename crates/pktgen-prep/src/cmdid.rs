//! Command-id table extraction
//!
//! The upstream listing is a Java source file declaring one command id per
//! line inside a section headed by a fixed marker comment. Its surrounding
//! layout is outside our control and drifts between releases, so instead of
//! a grammar for the whole file the extractor anchors on two local lexical
//! patterns per line: the declaration keyword-phrase before the symbolic
//! name, and the `= <digits>;` assignment around the numeric code. A line
//! contributes an entry only when both match; anything else (blank lines,
//! comments, braces, unrelated declarations) is skipped without error.

use pktgen_common::{PrepError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Section header preceding the identifier declarations in the listing.
/// Everything before it is discarded; if it never appears, the listing
/// layout is assumed unknown and extraction fails.
pub const CMD_ID_MARKER: &str = "// Cmd Ids";

/// Symbolic name: word token between the declaration keyword-phrase and a
/// trailing space
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"public static final int (\w+) ").expect("valid regex"));

/// Numeric code: digit run between the assignment marker and the statement
/// terminator
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"= ([0-9]+);").expect("valid regex"));

/// Mapping of command code (literal digit string) to symbolic name.
///
/// Serializes as a flat JSON object, e.g. `{"1": "PlayerLoginCsReq"}`.
/// Created fresh by each [`extract_table`] call and owned by the caller;
/// never mutated after serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CmdIdTable {
    pub entries: HashMap<String, String>,
}

impl CmdIdTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the symbolic name for a command code
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }
}

/// Extract the command-id table from the listing lines.
///
/// Scans for [`CMD_ID_MARKER`] first, then collects every following line on
/// which both the name and the code pattern match. Codes keep their literal
/// digit-string form, leading zeros included. A duplicate code overwrites
/// the earlier entry (the table is keyed by code); the overwrite is logged.
///
/// Zero matches after the marker is not an error, only a missing marker is.
pub fn extract_table<'a, I>(lines: I) -> Result<CmdIdTable>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = lines.into_iter();

    if !lines.by_ref().any(|line| line.trim() == CMD_ID_MARKER) {
        return Err(PrepError::marker_not_found(CMD_ID_MARKER));
    }

    let mut table = CmdIdTable::default();
    for line in lines {
        let line = line.trim();

        let name = NAME_PATTERN.captures(line).and_then(|c| c.get(1));
        let code = CODE_PATTERN.captures(line).and_then(|c| c.get(1));
        let (Some(name), Some(code)) = (name, code) else {
            continue;
        };

        if let Some(previous) = table
            .entries
            .insert(code.as_str().to_string(), name.as_str().to_string())
        {
            warn!(
                code = code.as_str(),
                previous = previous.as_str(),
                kept = name.as_str(),
                "duplicate command id in listing, keeping the later declaration"
            );
        }
    }

    Ok(table)
}
