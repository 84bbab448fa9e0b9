//! The update verify config: global target fields plus ordered release records.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use super::chunk::chunk;
use super::grammar::{Assignment, Key, check_value, format_assignment, parse_line};
use super::release::{NewRelease, PatchType, Release};
use crate::error::{ParseErrorKind, Result, UpdateVerifyError};

/// In-memory update verify config.
///
/// `releases` is the ordered source of truth: read order, write order and the
/// order of full/quick test listings all follow it.
#[derive(Debug, Clone, Default)]
pub struct UpdateVerifyConfig {
    pub product: Option<String>,
    pub channel: Option<String>,
    pub aus_server: Option<String>,
    /// Path of the build every release updates to.
    pub to: Option<String>,
    pub to_build_id: Option<String>,
    pub to_display_version: Option<String>,
    pub to_app_version: Option<String>,
    pub releases: Vec<Release>,
}

/// Counts reported by `update-verify check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSummary {
    pub releases: usize,
    pub full_tests: usize,
    pub quick_tests: usize,
    pub locale_pairs: usize,
}

impl UpdateVerifyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a release, or merge its locales into the record with the same
    /// `(release, build_id, platform, from)`.
    ///
    /// On merge only the locales are taken; every other field of `new` is
    /// ignored.
    pub fn add_release(&mut self, new: NewRelease) {
        match self
            .releases
            .iter_mut()
            .find(|existing| existing.same_identity(&new))
        {
            Some(existing) => {
                let added = existing.merge_locales(new.locales);
                debug!(
                    release = %existing.release,
                    build_id = %existing.build_id,
                    platform = %existing.platform,
                    added,
                    "merged locales into existing release"
                );
            }
            None => self.releases.push(new.into_release()),
        }
    }

    /// Insert `locale` into the first release matching `build_id` and `from`.
    ///
    /// `from == None` only matches quick tests. Inserting a locale that is
    /// already listed is a no-op.
    pub fn add_locale_to_release(
        &mut self,
        build_id: &str,
        locale: &str,
        from: Option<&str>,
    ) -> Result<()> {
        if !is_valid_locale(locale) {
            return Err(UpdateVerifyError::InvalidLocale(locale.to_string()));
        }
        let release = self
            .releases
            .iter_mut()
            .find(|release| release.matches(build_id, from))
            .ok_or_else(|| UpdateVerifyError::ReleaseNotFound {
                build_id: build_id.to_string(),
                from: from.map(str::to_string),
            })?;
        if release.insert_locale_sorted(locale) {
            debug!(build_id, locale, "added locale to release");
        }
        Ok(())
    }

    /// First release matching `build_id` and `from`, if any.
    pub fn get_release(&self, build_id: &str, from: Option<&str>) -> Option<&Release> {
        self.releases
            .iter()
            .find(|release| release.matches(build_id, from))
    }

    /// Releases that update from a specific earlier build.
    pub fn get_full_release_tests(&self) -> Vec<&Release> {
        self.releases
            .iter()
            .filter(|release| release.is_full_test())
            .collect()
    }

    /// Releases without a `from` build.
    pub fn get_quick_release_tests(&self) -> Vec<&Release> {
        self.releases
            .iter()
            .filter(|release| !release.is_full_test())
            .collect()
    }

    /// Chunk `this_chunk` (1-indexed) of `chunks` for parallel verification.
    ///
    /// The `(release, locale)` pairs of full tests and of quick tests are each
    /// split into contiguous near-equal chunks, earlier chunks taking the
    /// remainder. Releases keep all other fields; releases left without
    /// locales are dropped. An out-of-range request yields no releases.
    pub fn get_chunk(&self, chunks: usize, this_chunk: usize) -> UpdateVerifyConfig {
        let mut chunked = self.without_releases();

        let full = self.locale_pairs(true);
        let quick = self.locale_pairs(false);
        let (Some(full), Some(quick)) = (
            chunk(&full, chunks, this_chunk),
            chunk(&quick, chunks, this_chunk),
        ) else {
            warn!(chunks, this_chunk, "chunk out of range; no releases selected");
            return chunked;
        };

        for &(index, locale) in full.iter().chain(quick) {
            let source = &self.releases[index];
            chunked.add_release(NewRelease::from(source).locales([locale]));
        }
        debug!(
            chunks,
            this_chunk,
            full_pairs = full.len(),
            quick_pairs = quick.len(),
            releases = chunked.releases.len(),
            "computed chunk"
        );
        chunked
    }

    /// Check that the canonical form reads back as this config.
    ///
    /// Rejects values with a line break or both quote characters, and
    /// locales that are empty or contain whitespace.
    pub fn check_writable(&self) -> Result<()> {
        for key in Key::SCALARS {
            if let Some(value) = self.scalar(key) {
                check_field(key, value)?;
            }
        }
        for release in &self.releases {
            for key in Key::RELEASE {
                if let Some(value) = release_field(release, key) {
                    check_field(key, value)?;
                }
            }
            if let Some(locale) = release.locales.iter().find(|l| !is_valid_locale(l)) {
                return Err(UpdateVerifyError::InvalidLocale(locale.clone()));
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> ConfigSummary {
        let full_tests = self.get_full_release_tests().len();
        ConfigSummary {
            releases: self.releases.len(),
            full_tests,
            quick_tests: self.releases.len() - full_tests,
            locale_pairs: self
                .releases
                .iter()
                .map(|release| release.locales.len())
                .sum(),
        }
    }

    /// Fold every line of `text` into this config.
    ///
    /// Any error leaves `self` unchanged.
    pub fn read_str(&mut self, text: &str) -> Result<()> {
        let mut staged = self.clone();
        for (index, line) in text.lines().enumerate() {
            staged.read_line(index + 1, line)?;
        }
        *self = staged;
        Ok(())
    }

    /// Fold one line into this config. Blank and `#` comment lines are skipped.
    ///
    /// Scalars on a line that fails to declare a valid release are still set.
    pub fn read_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        if line.trim_start().starts_with('#') {
            return Ok(());
        }
        let parse_error = |kind: ParseErrorKind| UpdateVerifyError::Parse {
            line_no,
            line: line.to_string(),
            kind,
        };
        let assignments = parse_line(line).map_err(parse_error)?;
        let release = self.apply(assignments).map_err(parse_error)?;
        if let Some(release) = release {
            self.add_release(release);
        }
        Ok(())
    }

    /// Set scalars from `assignments` and build the release the line
    /// declares, if it has any release key.
    fn apply(
        &mut self,
        assignments: Vec<Assignment>,
    ) -> std::result::Result<Option<NewRelease>, ParseErrorKind> {
        let mut fields = ReleaseFields::default();
        for Assignment { key, value } in assignments {
            if key.is_scalar() {
                *self.scalar_mut(key) = Some(value);
            } else {
                fields.set(key, value);
            }
        }
        fields.into_new_release()
    }

    fn scalar_mut(&mut self, key: Key) -> &mut Option<String> {
        match key {
            Key::Product => &mut self.product,
            Key::Channel => &mut self.channel,
            Key::AusServer => &mut self.aus_server,
            Key::To => &mut self.to,
            Key::ToBuildId => &mut self.to_build_id,
            Key::ToDisplayVersion => &mut self.to_display_version,
            Key::ToAppVersion => &mut self.to_app_version,
            _ => unreachable!("{} is not a scalar key", key.name()),
        }
    }

    fn scalar(&self, key: Key) -> Option<&str> {
        match key {
            Key::Product => self.product.as_deref(),
            Key::Channel => self.channel.as_deref(),
            Key::AusServer => self.aus_server.as_deref(),
            Key::To => self.to.as_deref(),
            Key::ToBuildId => self.to_build_id.as_deref(),
            Key::ToDisplayVersion => self.to_display_version.as_deref(),
            Key::ToAppVersion => self.to_app_version.as_deref(),
            _ => None,
        }
    }

    fn without_releases(&self) -> UpdateVerifyConfig {
        UpdateVerifyConfig {
            product: self.product.clone(),
            channel: self.channel.clone(),
            aus_server: self.aus_server.clone(),
            to: self.to.clone(),
            to_build_id: self.to_build_id.clone(),
            to_display_version: self.to_display_version.clone(),
            to_app_version: self.to_app_version.clone(),
            releases: Vec::new(),
        }
    }

    /// `(release index, locale)` pairs of full or quick tests, in order.
    fn locale_pairs(&self, full: bool) -> Vec<(usize, &str)> {
        self.releases
            .iter()
            .enumerate()
            .filter(|(_, release)| release.is_full_test() == full)
            .flat_map(|(index, release)| {
                release
                    .locales
                    .iter()
                    .map(move |locale| (index, locale.as_str()))
            })
            .collect()
    }
}

/// Release keys collected from one line.
#[derive(Default)]
struct ReleaseFields {
    release: Option<String>,
    build_id: Option<String>,
    platform: Option<String>,
    locales: Option<String>,
    patch_types: Option<String>,
    from: Option<String>,
    ftp_server_from: Option<String>,
    ftp_server_to: Option<String>,
    mar_channel_ids: Option<String>,
}

impl ReleaseFields {
    fn set(&mut self, key: Key, value: String) {
        let slot = match key {
            Key::Release => &mut self.release,
            Key::BuildId => &mut self.build_id,
            Key::Platform => &mut self.platform,
            Key::Locales => &mut self.locales,
            Key::PatchTypes => &mut self.patch_types,
            Key::From => &mut self.from,
            Key::FtpServerFrom => &mut self.ftp_server_from,
            Key::FtpServerTo => &mut self.ftp_server_to,
            Key::MarChannelIds => &mut self.mar_channel_ids,
            _ => unreachable!("{} is not a release key", key.name()),
        };
        *slot = Some(value);
    }

    fn is_empty(&self) -> bool {
        self.release.is_none()
            && self.build_id.is_none()
            && self.platform.is_none()
            && self.locales.is_none()
            && self.patch_types.is_none()
            && self.from.is_none()
            && self.ftp_server_from.is_none()
            && self.ftp_server_to.is_none()
            && self.mar_channel_ids.is_none()
    }

    fn into_new_release(self) -> std::result::Result<Option<NewRelease>, ParseErrorKind> {
        if self.is_empty() {
            return Ok(None);
        }
        let release = self
            .release
            .ok_or(ParseErrorKind::MissingReleaseKey("release"))?;
        let build_id = self
            .build_id
            .ok_or(ParseErrorKind::MissingReleaseKey("build_id"))?;
        let platform = self
            .platform
            .ok_or(ParseErrorKind::MissingReleaseKey("platform"))?;

        let mut new = NewRelease::new(release, build_id, platform);
        if let Some(locales) = &self.locales {
            new = new.locales(locales.split_whitespace());
        }
        if let Some(patch_types) = &self.patch_types {
            let parsed = patch_types
                .split_whitespace()
                .map(str::parse::<PatchType>)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(ParseErrorKind::UnknownPatchType)?;
            new = new.patch_types(parsed);
        }
        new.from = self.from;
        new.ftp_server_from = self.ftp_server_from;
        new.ftp_server_to = self.ftp_server_to;
        new.mar_channel_ids = self.mar_channel_ids;
        Ok(Some(new))
    }
}

/// Canonical serialization: scalars one per line, then one line per release.
impl fmt::Display for UpdateVerifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in Key::SCALARS {
            if let Some(value) = self.scalar(key) {
                writeln!(f, "{}", format_assignment(key, value))?;
            }
        }
        for release in &self.releases {
            writeln!(f, "{}", release_line(release))?;
        }
        Ok(())
    }
}

fn release_line(release: &Release) -> String {
    let locales = release.locales.join(" ");
    let patch_types = release
        .patch_types
        .iter()
        .map(|patch_type| patch_type.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Key::RELEASE
        .into_iter()
        .filter_map(|key| {
            let value = match key {
                Key::Locales => Some(locales.as_str()),
                Key::PatchTypes => Some(patch_types.as_str()),
                _ => release_field(release, key),
            };
            value.map(|value| format_assignment(key, value))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-valued release field for `key`, if set.
fn release_field(release: &Release, key: Key) -> Option<&str> {
    match key {
        Key::Release => Some(&release.release),
        Key::BuildId => Some(&release.build_id),
        Key::Platform => Some(&release.platform),
        Key::From => release.from.as_deref(),
        Key::FtpServerFrom => release.ftp_server_from.as_deref(),
        Key::FtpServerTo => release.ftp_server_to.as_deref(),
        Key::MarChannelIds => release.mar_channel_ids.as_deref(),
        _ => None,
    }
}

fn check_field(key: Key, value: &str) -> Result<()> {
    check_value(value).map_err(|reason| UpdateVerifyError::Unwritable {
        key: key.name(),
        value: value.to_string(),
        reason,
    })
}

fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty() && !locale.contains(char::is_whitespace)
}

impl FromStr for UpdateVerifyConfig {
    type Err = UpdateVerifyError;

    fn from_str(s: &str) -> Result<Self> {
        let mut config = UpdateVerifyConfig::new();
        config.read_str(s)?;
        Ok(config)
    }
}

#[allow(clippy::partialeq_ne_impl)]
impl PartialEq for UpdateVerifyConfig {
    fn eq(&self, other: &Self) -> bool {
        self.product == other.product
            && self.channel == other.channel
            && self.aus_server == other.aus_server
            && self.to == other.to
            && self.to_build_id == other.to_build_id
            && self.to_display_version == other.to_display_version
            && self.to_app_version == other.to_app_version
            && self.releases == other.releases
    }

    fn ne(&self, other: &Self) -> bool {
        self.product != other.product
            || self.channel != other.channel
            || self.aus_server != other.aus_server
            || self.to != other.to
            || self.to_build_id != other.to_build_id
            || self.to_display_version != other.to_display_version
            || self.to_app_version != other.to_app_version
            || self.releases != other.releases
    }
}

impl Eq for UpdateVerifyConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FTP_SERVER, SAMPLE_CONFIG, sample_config, sample_target};

    fn firefox_4_0() -> NewRelease {
        NewRelease::new("4.0", "888", "Linux_x86-gcc3")
            .locales(["af", "de", "en-US", "ja", "zh-TW"])
            .patch_types([PatchType::Partial, PatchType::Complete])
            .from_path("/firefox/4.0rc1.tar.bz2")
            .ftp_servers(FTP_SERVER, FTP_SERVER)
            .mar_channel_ids("firefox-mozilla-beta")
    }

    #[test]
    fn eq_compares_scalars() {
        let mut left = UpdateVerifyConfig::new();
        left.product = Some("foo".to_string());
        left.channel = Some("betatest".to_string());
        left.aus_server = Some("aus".to_string());
        left.to = Some("/firefox/4.0rc2.tar.bz2".to_string());
        let right = left.clone();
        assert!(left == right);
        assert!(!(left != right));
    }

    #[test]
    fn ne_detects_scalar_difference() {
        let mut left = UpdateVerifyConfig::new();
        left.product = Some("foo".to_string());
        let right = UpdateVerifyConfig::new();
        assert!(left != right);
        assert!(!(left == right));
    }

    #[test]
    fn ne_detects_release_difference() {
        let mut left = sample_target();
        let right = left.clone();
        left.add_release(NewRelease::new("3.6", "555", "Linux_x86-gcc3").locales(["de"]));
        assert!(left != right);
    }

    #[test]
    fn add_release_records_all_fields() {
        let mut config = UpdateVerifyConfig::new();
        config.add_release(
            NewRelease::new("4.0", "555", "bar")
                .locales(["af", "de"])
                .patch_types([PatchType::Partial, PatchType::Complete])
                .from_path("/pub/firefox/foo.bz2")
                .ftp_servers("from", "to")
                .mar_channel_ids("firefox-mozilla-booyah"),
        );
        assert_eq!(
            config.releases,
            vec![Release {
                release: "4.0".to_string(),
                build_id: "555".to_string(),
                platform: "bar".to_string(),
                locales: vec!["af".to_string(), "de".to_string()],
                patch_types: vec![PatchType::Partial, PatchType::Complete],
                from: Some("/pub/firefox/foo.bz2".to_string()),
                ftp_server_from: Some("from".to_string()),
                ftp_server_to: Some("to".to_string()),
                mar_channel_ids: Some("firefox-mozilla-booyah".to_string()),
            }]
        );
    }

    #[test]
    fn add_release_with_new_platform_is_distinct() {
        let mut config = UpdateVerifyConfig::new();
        config.add_release(NewRelease::new("4.0", "555", "WINNT_x86-msvc").locales(["af"]));
        config.add_release(NewRelease::new("4.0", "555", "WINNT_x86-msvc-x86").locales(["af"]));
        let platforms: Vec<&str> = config
            .releases
            .iter()
            .map(|release| release.platform.as_str())
            .collect();
        assert_eq!(platforms, vec!["WINNT_x86-msvc", "WINNT_x86-msvc-x86"]);
    }

    #[test]
    fn add_release_merges_locales_in_first_seen_order() {
        let mut config = UpdateVerifyConfig::new();
        config.add_release(NewRelease::new("4.0", "555", "linux").locales(["en-US", "af"]));
        config.add_release(
            NewRelease::new("4.0", "555", "linux")
                .locales(["de", "af", "ja"])
                .mar_channel_ids("ignored"),
        );
        assert_eq!(config.releases.len(), 1);
        assert_eq!(config.releases[0].locales, vec!["en-US", "af", "de", "ja"]);
        assert_eq!(config.releases[0].mar_channel_ids, None);
    }

    #[test]
    fn list_and_array_locales_are_equivalent() {
        let mut from_vec = UpdateVerifyConfig::new();
        from_vec.add_release(
            NewRelease::new("3.7a1", "666", "linux").locales(vec!["en-US".to_string()]),
        );
        let mut from_array = UpdateVerifyConfig::new();
        from_array.add_release(NewRelease::new("3.7a1", "666", "linux").locales(["en-US"]));
        assert_eq!(from_vec, from_array);
    }

    #[test]
    fn read_folds_split_lines_into_records() {
        let config: UpdateVerifyConfig = SAMPLE_CONFIG.parse().expect("parse");
        assert_eq!(config, sample_config());
    }

    #[test]
    fn write_reproduces_canonical_text() {
        assert_eq!(sample_config().to_string(), SAMPLE_CONFIG);
    }

    #[test]
    fn read_skips_comments_and_blank_lines() {
        let text = format!("# generated for 4.0rc2\n\n{SAMPLE_CONFIG}\n   \n");
        let config: UpdateVerifyConfig = text.parse().expect("parse");
        assert_eq!(config, sample_config());
    }

    #[test]
    fn read_reports_line_number() {
        let text = "product=\"Firefox\"\nfoo=\"bar\"\n";
        let err = text.parse::<UpdateVerifyConfig>().unwrap_err();
        match err {
            UpdateVerifyError::Parse { line_no, line, kind } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "foo=\"bar\"");
                assert_eq!(kind, ParseErrorKind::UnknownKey("foo".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_rejects_release_line_without_platform() {
        let err = "release=\"4.0\" build_id=\"888\""
            .parse::<UpdateVerifyConfig>()
            .unwrap_err();
        assert_eq!(
            err.parse_kind(),
            Some(&ParseErrorKind::MissingReleaseKey("platform"))
        );
    }

    #[test]
    fn read_rejects_unknown_patch_type() {
        let err = "release=\"4.0\" build_id=\"888\" platform=\"linux\" \
                   patch_types=\"partial delta\""
            .parse::<UpdateVerifyConfig>()
            .unwrap_err();
        assert_eq!(
            err.parse_kind(),
            Some(&ParseErrorKind::UnknownPatchType("delta".to_string()))
        );
    }

    #[test]
    fn read_accepts_target_version_keys() {
        let text = "to_build_id=\"20110318052756\" to_display_version=\"4.0\" \
                    to_app_version=\"4.0\"\n";
        let config: UpdateVerifyConfig = text.parse().expect("parse");
        assert_eq!(config.to_build_id.as_deref(), Some("20110318052756"));
        assert_eq!(config.to_display_version.as_deref(), Some("4.0"));
        assert_eq!(config.to_app_version.as_deref(), Some("4.0"));
        assert!(config.releases.is_empty());
        let written = config.to_string();
        assert_eq!(
            written,
            "to_build_id=\"20110318052756\"\nto_display_version=\"4.0\"\nto_app_version=\"4.0\"\n"
        );
    }

    #[test]
    fn written_config_reads_back_equal() {
        let mut config = sample_target();
        config.add_release(firefox_4_0());
        config.add_release(
            NewRelease::new("4.0b1", "222", "Linux_x86-gcc3")
                .locales(["en-US", "ja"])
                .from_path("/firefox/Firefox 4.0 Beta 1.exe"),
        );
        let reread: UpdateVerifyConfig = config.to_string().parse().expect("parse");
        assert_eq!(reread, config);
    }

    #[test]
    fn value_with_double_quote_reads_back_equal() {
        let text = "release=\"4.0\" build_id=\"1\" platform=\"linux\" \
                    from='/firefox/Firefox \"4.0\".exe'\n";
        let config: UpdateVerifyConfig = text.parse().expect("parse");
        assert_eq!(
            config.releases[0].from.as_deref(),
            Some("/firefox/Firefox \"4.0\".exe")
        );
        config.check_writable().expect("writable");
        let reread: UpdateVerifyConfig = config.to_string().parse().expect("reparse");
        assert_eq!(reread, config);
    }

    #[test]
    fn check_writable_rejects_values_that_would_not_read_back() {
        let mut config = sample_config();
        config.releases[1].platform = "linux\nrelease=\"x\"".to_string();
        assert!(matches!(
            config.check_writable(),
            Err(UpdateVerifyError::Unwritable {
                key: "platform",
                reason: "contains a line break",
                ..
            })
        ));

        let mut config = sample_config();
        config.releases[0].locales.push(String::new());
        assert!(matches!(
            config.check_writable(),
            Err(UpdateVerifyError::InvalidLocale(ref locale)) if locale.is_empty()
        ));
    }

    #[test]
    fn add_locale_rejects_whitespace() {
        let mut config = sample_config();
        let err = config
            .add_locale_to_release("777", "he IL", None)
            .unwrap_err();
        assert!(matches!(err, UpdateVerifyError::InvalidLocale(ref locale) if locale == "he IL"));
        assert_eq!(config, sample_config());
    }

    #[test]
    fn add_locale_to_full_release() {
        let mut config = sample_config();
        config
            .add_locale_to_release("888", "he", Some("/firefox/4.0rc1.tar.bz2"))
            .expect("add locale");
        let release = config
            .get_release("888", Some("/firefox/4.0rc1.tar.bz2"))
            .expect("release");
        assert_eq!(
            release.locales,
            vec!["af", "de", "en-US", "he", "ja", "zh-TW"]
        );
    }

    #[test]
    fn add_locale_without_from_targets_quick_release() {
        let mut config = sample_config();
        config
            .add_locale_to_release("777", "he", None)
            .expect("add locale");
        let release = config.get_release("777", None).expect("release");
        assert_eq!(release.locales, vec!["de", "he", "ja", "zh-TW"]);
        let full = config
            .get_release("777", Some("/firefox/4.0b12.tar.bz2"))
            .expect("release");
        assert_eq!(full.locales, vec!["af", "en-US"]);
    }

    #[test]
    fn add_present_locale_is_noop() {
        let mut config = sample_config();
        config
            .add_locale_to_release("777", "ja", None)
            .expect("add locale");
        assert_eq!(config, sample_config());
    }

    #[test]
    fn add_locale_to_missing_release_fails() {
        let mut config = sample_config();
        let err = config.add_locale_to_release("123", "he", None).unwrap_err();
        assert!(matches!(
            err,
            UpdateVerifyError::ReleaseNotFound { ref build_id, from: None } if build_id == "123"
        ));
    }

    #[test]
    fn get_missing_release_is_none() {
        assert!(sample_config().get_release("123", None).is_none());
    }

    #[test]
    fn full_release_tests_keep_order() {
        let config = sample_config();
        let mut expected = sample_target();
        expected.add_release(firefox_4_0());
        expected.add_release(
            NewRelease::new("4.0b12", "777", "Linux_x86-gcc3")
                .locales(["af", "en-US"])
                .from_path("/firefox/4.0b12.tar.bz2")
                .ftp_servers(FTP_SERVER, FTP_SERVER),
        );
        let full: Vec<Release> = config
            .get_full_release_tests()
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(full, expected.releases);
    }

    #[test]
    fn quick_release_tests_keep_order() {
        let config = sample_config();
        let mut expected = sample_target();
        expected.add_release(
            NewRelease::new("4.0b12", "777", "Linux_x86-gcc3")
                .locales(["de", "ja", "zh-TW"])
                .ftp_servers(FTP_SERVER, FTP_SERVER),
        );
        expected.add_release(
            NewRelease::new("3.7a1", "666", "Linux_x86-gcc3")
                .locales(["en-US"])
                .ftp_servers(FTP_SERVER, FTP_SERVER),
        );
        let quick: Vec<Release> = config
            .get_quick_release_tests()
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(quick, expected.releases);
    }

    #[test]
    fn full_and_quick_partition_releases() {
        let config = sample_config();
        let summary = config.summary();
        assert_eq!(
            summary,
            ConfigSummary {
                releases: 4,
                full_tests: 2,
                quick_tests: 2,
                locale_pairs: 11,
            }
        );
    }

    #[test]
    fn first_chunk_takes_head_of_full_and_quick_tests() {
        let config = sample_config();
        let mut expected = sample_target();
        expected.add_release(firefox_4_0().locales(["af", "de", "en-US"]));
        expected.add_release(
            NewRelease::new("4.0b12", "777", "Linux_x86-gcc3")
                .locales(["de", "ja"])
                .ftp_servers(FTP_SERVER, FTP_SERVER),
        );
        assert_eq!(config.get_chunk(3, 1), expected);
    }

    #[test]
    fn chunk_keeps_paths_with_spaces() {
        let mut config = sample_target();
        config.to = Some("/firefox/Firefox 4.0 Beta 2.exe".to_string());
        config.add_release(
            NewRelease::new("4.0b1", "222", "Linux_x86-gcc3")
                .locales(["en-US", "ja", "zh-TW"])
                .from_path("/firefox/Firefox 4.0 Beta 1.exe"),
        );

        let mut expected = sample_target();
        expected.to = Some("/firefox/Firefox 4.0 Beta 2.exe".to_string());
        expected.add_release(
            NewRelease::new("4.0b1", "222", "Linux_x86-gcc3")
                .locales(["en-US", "ja"])
                .from_path("/firefox/Firefox 4.0 Beta 1.exe"),
        );
        assert_eq!(config.get_chunk(2, 1), expected);
    }

    #[test]
    fn chunk_does_not_mutate_source() {
        let config = sample_config();
        let _ = config.get_chunk(4, 2);
        assert_eq!(config, sample_config());
    }

    #[test]
    fn out_of_range_chunk_has_no_releases() {
        let config = sample_config();
        let chunked = config.get_chunk(2, 3);
        assert!(chunked.releases.is_empty());
        assert_eq!(chunked.product, config.product);
        assert!(config.get_chunk(0, 1).releases.is_empty());
    }
}
