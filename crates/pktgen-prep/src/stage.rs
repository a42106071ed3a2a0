//! Staging of generator inputs
//!
//! The staged data directory is owned exclusively by one pipeline run: the
//! serialized command-id table is written once (overwriting any prior file
//! at that path) and the schema tree is copied whole, never merged into
//! leftovers from an earlier run.

use crate::cmdid::CmdIdTable;
use pktgen_common::{PrepError, Result};
use std::fs;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Serialize the command-id table to a JSON file
pub fn write_table(table: &CmdIdTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json)?;

    info!(entries = table.len(), "Command-id table saved to {}", path.display());
    Ok(())
}

/// Read a previously serialized command-id table
pub fn read_table(path: &Path) -> Result<CmdIdTable> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Recursively copy the schema tree from `src` into `dst`.
///
/// Fails if `src` is missing or `dst` already exists — stale staged data
/// must not be silently merged with a fresh copy.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(PrepError::staging(format!(
            "source tree '{}' does not exist",
            src.display()
        )));
    }
    if dst.exists() {
        return Err(PrepError::staging(format!(
            "destination '{}' already exists, refusing to merge",
            dst.display()
        )));
    }

    let mut files = 0usize;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| PrepError::staging(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| PrepError::staging(e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }

    info!(files, "Copied {} -> {}", src.display(), dst.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_table_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("packetIds.json");

        let table = CmdIdTable {
            entries: HashMap::from([
                ("1".to_string(), "PlayerLoginCsReq".to_string()),
                ("007".to_string(), "Padded".to_string()),
            ]),
        };

        write_table(&table, &path).unwrap();
        let reread = read_table(&path).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn test_write_table_overwrites_prior_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("packetIds.json");
        fs::write(&path, "{\"stale\": \"Entry\"}").unwrap();

        let table = CmdIdTable {
            entries: HashMap::from([("2".to_string(), "Fresh".to_string())]),
        };
        write_table(&table, &path).unwrap();

        assert_eq!(read_table(&path).unwrap(), table);
    }

    #[test]
    fn test_copy_tree_is_recursive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("proto");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("player.proto"), "message Player {}").unwrap();
        fs::write(src.join("nested/scene.proto"), "message Scene {}").unwrap();

        let dst = dir.path().join("data").join("proto");
        fs::create_dir(dir.path().join("data")).unwrap();
        copy_tree(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("player.proto")).unwrap(),
            "message Player {}"
        );
        assert_eq!(
            fs::read_to_string(dst.join("nested/scene.proto")).unwrap(),
            "message Scene {}"
        );
    }

    #[test]
    fn test_copy_tree_rejects_existing_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("proto");
        let dst = dir.path().join("staged");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();

        let err = copy_tree(&src, &dst).unwrap_err();
        assert!(matches!(err, PrepError::Staging(_)));
    }

    #[test]
    fn test_copy_tree_rejects_missing_source() {
        let dir = TempDir::new().unwrap();

        let err = copy_tree(&dir.path().join("missing"), &dir.path().join("dst")).unwrap_err();
        assert!(matches!(err, PrepError::Staging(_)));
    }
}
