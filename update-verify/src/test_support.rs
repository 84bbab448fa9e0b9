//! Test-only helpers for building update verify configs.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::config::UpdateVerifyConfig;
use crate::core::release::{NewRelease, PatchType};

/// Canonical config used across tests (byte-exact writer output).
pub const SAMPLE_CONFIG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/sample-update-verify.cfg"
));

pub const FTP_SERVER: &str = "stage.mozilla.org/firefox";

/// Config with the sample's target fields and no releases.
pub fn sample_target() -> UpdateVerifyConfig {
    UpdateVerifyConfig {
        product: Some("Firefox".to_string()),
        channel: Some("betatest".to_string()),
        aus_server: Some("https://aus4.mozilla.org".to_string()),
        to: Some("/firefox/4.0rc2.tar.bz2".to_string()),
        ..UpdateVerifyConfig::default()
    }
}

/// The in-memory equivalent of [`SAMPLE_CONFIG`], built through `add_release`.
///
/// The 4.0b12 build appears twice: once as a full test and once as a quick
/// test whose locales arrive in a separate call.
pub fn sample_config() -> UpdateVerifyConfig {
    let mut config = sample_target();
    config.add_release(
        NewRelease::new("4.0", "888", "Linux_x86-gcc3")
            .locales(["af", "de", "en-US", "ja", "zh-TW"])
            .patch_types([PatchType::Partial, PatchType::Complete])
            .from_path("/firefox/4.0rc1.tar.bz2")
            .ftp_servers(FTP_SERVER, FTP_SERVER)
            .mar_channel_ids("firefox-mozilla-beta"),
    );
    config.add_release(
        NewRelease::new("4.0b12", "777", "Linux_x86-gcc3")
            .locales(["af", "en-US"])
            .from_path("/firefox/4.0b12.tar.bz2")
            .ftp_servers(FTP_SERVER, FTP_SERVER),
    );
    config.add_release(
        NewRelease::new("4.0b12", "777", "Linux_x86-gcc3")
            .locales(["de", "ja"])
            .ftp_servers(FTP_SERVER, FTP_SERVER),
    );
    config.add_release(NewRelease::new("4.0b12", "777", "Linux_x86-gcc3").locales(["zh-TW"]));
    config.add_release(
        NewRelease::new("3.7a1", "666", "Linux_x86-gcc3")
            .locales(["en-US"])
            .ftp_servers(FTP_SERVER, FTP_SERVER),
    );
    config
}

/// Write [`SAMPLE_CONFIG`] into a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn sample_config_file() -> (TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("update-verify.cfg");
    fs::write(&path, SAMPLE_CONFIG).expect("write sample config");
    (temp, path)
}
