//! Stable exit codes for `update-verify` commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid arguments or settings, or an I/O failure.
pub const INVALID: i32 = 1;
/// The config file failed to parse.
pub const PARSE: i32 = 2;
/// `add-locale` found no matching release.
pub const NOT_FOUND: i32 = 3;
