//! Pipeline orchestration
//!
//! Strictly sequential, one shot: clone the protocol repositories, fetch
//! the identifier listing, extract and serialize the command-id table,
//! stage the schema tree, then hand everything to the generator. Every
//! stage's output is a precondition of the next, nothing runs concurrently,
//! and the first failure aborts the run with whatever has been written so
//! far left in place for inspection.

use crate::{cmdid, codegen, fetch, stage};
use pktgen_common::{PrepError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Upstream identifier listing (the Java command-id declarations)
pub const DEFAULT_LISTING_URL: &str = "https://raw.githubusercontent.com/Melledy/LunarCore/development/src/main/java/emu/lunarcore/server/packet/CmdId.java";

/// Protocol schema repository; its `proto/` tree is staged for the generator
pub const DEFAULT_PROTOS_REPO: &str = "https://gitlab.com/Melledy/LunarCore-Protos.git";

/// Source protocol definitions handed to the generator
pub const DEFAULT_SOURCE_REPO: &str = "https://github.com/IceDynamix/reliquary.git";

/// Generator tool source, built and run via cargo when no prebuilt binary
/// is given
pub const DEFAULT_CODEGEN_REPO: &str = "https://github.com/IceDynamix/reliquary-codegen.git";

/// File name of the serialized command-id table inside the data directory
pub const TABLE_FILE_NAME: &str = "packetIds.json";

/// Subdirectory of the schema repository that gets staged
const PROTO_SUBDIR: &str = "proto";

/// Pipeline configuration; defaults reproduce a bare single-shot run
/// against the upstream sources
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// URL of the identifier-listing source
    pub listing_url: String,

    /// Repository holding the protocol schema tree
    pub protos_repo: String,

    /// Repository holding the source protocol definitions
    pub source_repo: String,

    /// Repository holding the generator tool source
    pub codegen_repo: String,

    /// Directory the repository snapshots are cloned into
    pub workdir: PathBuf,

    /// Staged data directory assembled for the generator
    pub data_dir: PathBuf,

    /// Prebuilt generator binary; when absent the tool is built and run
    /// from its cloned source
    pub generator: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            protos_repo: DEFAULT_PROTOS_REPO.to_string(),
            source_repo: DEFAULT_SOURCE_REPO.to_string(),
            codegen_repo: DEFAULT_CODEGEN_REPO.to_string(),
            workdir: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            generator: None,
        }
    }
}

/// Run the full preparation pipeline
pub async fn run(config: &PipelineConfig) -> Result<()> {
    let protos_dir = config.workdir.join(repo_dir_name(&config.protos_repo));
    let source_dir = config.workdir.join(repo_dir_name(&config.source_repo));
    let codegen_dir = config.workdir.join(repo_dir_name(&config.codegen_repo));

    fetch::clone_repo(&config.protos_repo, &protos_dir).await?;
    fetch::clone_repo(&config.source_repo, &source_dir).await?;
    if config.generator.is_none() {
        fetch::clone_repo(&config.codegen_repo, &codegen_dir).await?;
    }

    create_data_dir(&config.data_dir)?;

    let client = reqwest::Client::new();
    let listing = fetch::fetch_listing(&client, &config.listing_url).await?;
    let table = cmdid::extract_table(listing.lines())?;
    info!(entries = table.len(), "Extracted command-id table");

    stage::write_table(&table, &config.data_dir.join(TABLE_FILE_NAME))?;
    stage::copy_tree(
        &protos_dir.join(PROTO_SUBDIR),
        &config.data_dir.join(PROTO_SUBDIR),
    )?;

    // The generator subprocess may run with a different working directory,
    // so it gets absolute paths
    let source_dir = fs::canonicalize(&source_dir)?;
    let data_dir = fs::canonicalize(&config.data_dir)?;
    match &config.generator {
        Some(tool) => codegen::run_generator(tool, &source_dir, &data_dir).await?,
        None => codegen::run_generator_from_source(&codegen_dir, &source_dir, &data_dir).await?,
    }

    info!("Pipeline complete, staged data in {}", data_dir.display());
    Ok(())
}

/// Create the staged data directory; a leftover from a previous run is a
/// collision, not something to merge into
fn create_data_dir(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            PrepError::staging(format!(
                "data directory '{}' already exists, remove it before rerunning",
                path.display()
            ))
        } else {
            PrepError::Io(e)
        }
    })
}

/// Directory a `git clone` of `url` lands in: the last path segment, minus
/// any `.git` suffix
fn repo_dir_name(url: &str) -> String {
    let tail = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url);
    tail.trim_end_matches(".git").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_dir_name() {
        assert_eq!(
            repo_dir_name("https://gitlab.com/Melledy/LunarCore-Protos.git"),
            "LunarCore-Protos"
        );
        assert_eq!(
            repo_dir_name("https://github.com/IceDynamix/reliquary"),
            "reliquary"
        );
        assert_eq!(repo_dir_name("local-checkout/"), "local-checkout");
    }

    #[test]
    fn test_create_data_dir_rejects_leftovers() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");

        create_data_dir(&data).unwrap();
        let err = create_data_dir(&data).unwrap_err();
        assert!(matches!(err, PrepError::Staging(_)));
    }
}
