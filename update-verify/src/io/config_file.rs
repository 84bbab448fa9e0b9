//! Reading and writing update verify config files.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::UpdateVerifyConfig;
use crate::error::{Result, UpdateVerifyError};

/// Label used in errors for configs read from an unnamed stream.
const STREAM_LABEL: &str = "-";

impl UpdateVerifyConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        config.read(path)?;
        Ok(config)
    }

    /// Fold the config file at `path` into `self`.
    ///
    /// Any error leaves `self` unchanged.
    pub fn read(&mut self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "reading update verify config");
        let file = File::open(path).map_err(|source| io_error(path, source))?;
        self.read_lines(BufReader::new(file), path)?;
        debug!(
            path = %path.display(),
            releases = self.releases.len(),
            "update verify config loaded"
        );
        Ok(())
    }

    /// Fold config text from any buffered reader into `self`.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.read_lines(reader, Path::new(STREAM_LABEL))
    }

    /// Atomically write the canonical form to `path` (temp file + rename).
    ///
    /// Fails without touching `path` if a value would not read back.
    pub fn write(&self, path: &Path) -> Result<()> {
        self.check_writable()?;
        debug!(
            path = %path.display(),
            releases = self.releases.len(),
            "writing update verify config"
        );
        write_atomic(path, &self.to_string())
    }

    /// Write the canonical form to any writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        self.check_writable()?;
        write!(writer, "{self}")
            .and_then(|()| writer.flush())
            .map_err(|source| io_error(Path::new(STREAM_LABEL), source))
    }

    fn read_lines<R: BufRead>(&mut self, reader: R, path: &Path) -> Result<()> {
        let mut staged = self.clone();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| io_error(path, source))?;
            staged.read_line(index + 1, &line)?;
        }
        *self = staged;
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, contents).map_err(|source| io_error(&tmp_path, source))?;
    fs::rename(&tmp_path, path).map_err(|source| io_error(path, source))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: io::Error) -> UpdateVerifyError {
    UpdateVerifyError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::test_support::{SAMPLE_CONFIG, sample_config, sample_config_file};

    #[test]
    fn load_reads_sample_file() {
        let (_temp, path) = sample_config_file();
        let config = UpdateVerifyConfig::load(&path).expect("load");
        assert_eq!(config, sample_config());
    }

    /// Byte-exact round trip: read the canonical file, write it back.
    #[test]
    fn read_then_write_is_byte_identical() {
        let (temp, path) = sample_config_file();
        let config = UpdateVerifyConfig::load(&path).expect("load");
        let out = temp.path().join("out.cfg");
        config.write(&out).expect("write");
        assert_eq!(fs::read_to_string(&out).expect("read"), SAMPLE_CONFIG);
        assert!(!tmp_path_for(&out).exists());
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let out = temp.path().join("chunks").join("update-verify-1.cfg");
        sample_config().write(&out).expect("write");
        assert_eq!(UpdateVerifyConfig::load(&out).expect("load"), sample_config());
    }

    #[test]
    fn write_to_stream_matches_file_form() {
        let mut buf = Vec::new();
        sample_config().write_to(&mut buf).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), SAMPLE_CONFIG);
    }

    #[test]
    fn read_from_stream() {
        let mut config = UpdateVerifyConfig::new();
        config
            .read_from(SAMPLE_CONFIG.as_bytes())
            .expect("read stream");
        assert_eq!(config, sample_config());
    }

    #[test]
    fn read_split_fixture_merges_quick_locales() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/split-update-verify.cfg");
        let config = UpdateVerifyConfig::load(&path).expect("load");
        assert_eq!(config.product.as_deref(), Some("Firefox"));
        assert_eq!(config.to.as_deref(), Some("/firefox/4.0rc2.tar.bz2"));
        assert_eq!(config.releases.len(), 1);
        assert_eq!(config.releases[0].locales, vec!["de", "ja", "zh-TW"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = UpdateVerifyConfig::load(&temp.path().join("missing.cfg")).unwrap_err();
        assert!(matches!(err, UpdateVerifyError::Io { .. }));
    }

    #[test]
    fn parse_error_aborts_read() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("bad.cfg");
        fs::write(&path, "product=\"Firefox\"\nrelease=\"bar\" release=\"blah\"\n").expect("write");
        let mut config = UpdateVerifyConfig::new();
        let err = config.read(&path).unwrap_err();
        assert_eq!(
            err.parse_kind(),
            Some(&ParseErrorKind::DuplicateKey("release".to_string()))
        );
        assert_eq!(config, UpdateVerifyConfig::new());
    }

    #[test]
    fn unwritable_locale_leaves_file_untouched() {
        let (_temp, path) = sample_config_file();
        let mut config = UpdateVerifyConfig::load(&path).expect("load");
        config.releases[0].locales.push("he IL".to_string());

        let err = config.write(&path).unwrap_err();
        assert!(matches!(err, UpdateVerifyError::InvalidLocale(ref locale) if locale == "he IL"));
        assert_eq!(fs::read_to_string(&path).expect("read"), SAMPLE_CONFIG);
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn write_to_rejects_value_with_both_quotes() {
        let mut config = sample_config();
        config.channel = Some("it's \"beta\"".to_string());
        let mut buf = Vec::new();
        let err = config.write_to(&mut buf).unwrap_err();
        assert!(matches!(err, UpdateVerifyError::Unwritable { key: "channel", .. }));
        assert!(buf.is_empty());
    }
}
