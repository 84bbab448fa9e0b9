//! Update verify configs: which earlier builds to check for update delivery.
//!
//! A config names a target build plus an ordered list of release records
//! (build, platform, locales, patch types). The crate is split in two:
//!
//! - **[`core`]**: Pure, deterministic logic (line grammar, release merging,
//!   chunking). No I/O, fully testable in isolation.
//! - **[`io`]**: Config files on disk and tool settings.
//!
//! The `update-verify` binary wires both into a small CLI.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::config::{ConfigSummary, UpdateVerifyConfig};
pub use crate::core::release::{NewRelease, PatchType, Release};
pub use crate::error::{ParseErrorKind, UpdateVerifyError};
