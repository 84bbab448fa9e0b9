//! I/O helpers: config files on disk and tool settings.

pub mod config_file;
pub mod settings;
