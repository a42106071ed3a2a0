//! pktgen Common Library
//!
//! Shared error handling and logging setup for the pktgen workspace.
//!
//! # Overview
//!
//! This crate provides the functionality shared by the pktgen members:
//!
//! - **Error Handling**: The pipeline-wide error type and result alias
//! - **Logging**: Tracing configuration and initialization
//!
//! # Example
//!
//! ```no_run
//! use pktgen_common::{PrepError, Result};
//!
//! fn parse_code(token: &str) -> Result<u32> {
//!     token
//!         .parse()
//!         .map_err(|_| PrepError::Staging(format!("bad code token: {token}")))
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{PrepError, Result};
