//! External code-generator invocation
//!
//! The generator is a black box to this pipeline: it gets the source
//! protocol definitions and the staged data directory as arguments, and its
//! exit code is the sole success signal. Output is captured so a failure
//! can be diagnosed by the operator.

use pktgen_common::{PrepError, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Run a prebuilt generator binary against the staged data
pub async fn run_generator(tool: &Path, source_dir: &Path, data_dir: &Path) -> Result<()> {
    info!(
        "Running generator {} with source {} and data {}",
        tool.display(),
        source_dir.display(),
        data_dir.display()
    );

    let mut cmd = Command::new(tool);
    cmd.arg(source_dir).arg(data_dir);
    check_exit(cmd).await
}

/// Build and run the generator from its cloned source tree via
/// `cargo run -- <source> <data>`.
///
/// Paths must be absolute, the subprocess runs with the repository as its
/// working directory.
pub async fn run_generator_from_source(repo: &Path, source_dir: &Path, data_dir: &Path) -> Result<()> {
    info!(
        "Running generator from {} with source {} and data {}",
        repo.display(),
        source_dir.display(),
        data_dir.display()
    );

    let mut cmd = Command::new("cargo");
    cmd.arg("run")
        .arg("--")
        .arg(source_dir)
        .arg(data_dir)
        .current_dir(repo);
    check_exit(cmd).await
}

async fn check_exit(mut cmd: Command) -> Result<()> {
    let output = cmd.output().await?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(PrepError::Generation {
            status: output.status.code(),
            output: combined,
        });
    }

    debug!(stdout_bytes = output.stdout.len(), "Generator finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_script(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let dir = TempDir::new().unwrap();
        let tool = write_script(&dir, "gen-ok", "exit 0");

        run_generator(&tool, dir.path(), dir.path()).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_surfaces_output() {
        let dir = TempDir::new().unwrap();
        let tool = write_script(&dir, "gen-fail", "echo unknown schema >&2\nexit 3");

        let err = run_generator(&tool, dir.path(), dir.path())
            .await
            .unwrap_err();
        match err {
            PrepError::Generation { status, output } => {
                assert_eq!(status, Some(3));
                assert!(output.contains("unknown schema"));
            },
            other => panic!("expected Generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_tool_is_io_error() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("no-such-tool");

        let err = run_generator(&tool, dir.path(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, PrepError::Io(_)));
    }
}
