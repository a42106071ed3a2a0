//! pktgen Preparation Library
//!
//! One-shot preparation of build artifacts for a network-protocol
//! reverse-engineering toolchain.
//!
//! # Pipeline stages
//!
//! - **fetch**: retrieve the identifier listing over HTTP and the protocol
//!   repositories as shallow git snapshots
//! - **cmdid**: extract the command-id → symbolic-name table from the
//!   listing (the only stage with parsing logic)
//! - **stage**: serialize the table and copy the schema tree into the data
//!   directory
//! - **codegen**: invoke the external code generator against the staged data
//!
//! # Example
//!
//! ```no_run
//! use pktgen_prep::pipeline::{self, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Prepare the staged data directory with upstream defaults
//!     pipeline::run(&PipelineConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod cmdid;
pub mod codegen;
pub mod fetch;
pub mod pipeline;
pub mod stage;
