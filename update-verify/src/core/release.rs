//! Release records: one build to verify updates from.

use std::fmt;
use std::str::FromStr;

/// Kind of update package to check for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchType {
    Partial,
    Complete,
}

impl PatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partial" => Ok(Self::Partial),
            "complete" => Ok(Self::Complete),
            other => Err(other.to_string()),
        }
    }
}

/// A single release entry in an update verify config.
///
/// `from` decides the kind of test: `Some` is a full test (update from that
/// build), `None` is a quick test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub release: String,
    pub build_id: String,
    pub platform: String,
    /// Duplicate-free, insertion ordered.
    pub locales: Vec<String>,
    pub patch_types: Vec<PatchType>,
    pub from: Option<String>,
    pub ftp_server_from: Option<String>,
    pub ftp_server_to: Option<String>,
    pub mar_channel_ids: Option<String>,
}

impl Release {
    pub fn is_full_test(&self) -> bool {
        self.from.is_some()
    }

    /// True if this record is the same logical release as `candidate`.
    pub(crate) fn same_identity(&self, candidate: &NewRelease) -> bool {
        self.release == candidate.release
            && self.build_id == candidate.build_id
            && self.platform == candidate.platform
            && self.from == candidate.from
    }

    /// True if this record answers a `(build_id, from)` lookup.
    pub(crate) fn matches(&self, build_id: &str, from: Option<&str>) -> bool {
        self.build_id == build_id && self.from.as_deref() == from
    }

    /// Append locales not already present, keeping first-seen order.
    pub(crate) fn merge_locales<I>(&mut self, locales: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.locales.len();
        for locale in locales {
            if !self.locales.contains(&locale) {
                self.locales.push(locale);
            }
        }
        self.locales.len() - before
    }

    /// Insert `locale` ahead of the first locale that sorts after it.
    ///
    /// Returns false if the locale was already present.
    pub(crate) fn insert_locale_sorted(&mut self, locale: &str) -> bool {
        if self.locales.iter().any(|existing| existing == locale) {
            return false;
        }
        let at = self
            .locales
            .iter()
            .position(|existing| existing.as_str() > locale)
            .unwrap_or(self.locales.len());
        self.locales.insert(at, locale.to_string());
        true
    }
}

/// Arguments for
/// [`UpdateVerifyConfig::add_release`](super::config::UpdateVerifyConfig::add_release).
///
/// `patch_types` defaults to `[Complete]`; every optional field defaults to
/// unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    pub release: String,
    pub build_id: String,
    pub platform: String,
    pub locales: Vec<String>,
    pub patch_types: Vec<PatchType>,
    pub from: Option<String>,
    pub ftp_server_from: Option<String>,
    pub ftp_server_to: Option<String>,
    pub mar_channel_ids: Option<String>,
}

impl NewRelease {
    pub fn new(
        release: impl Into<String>,
        build_id: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            release: release.into(),
            build_id: build_id.into(),
            platform: platform.into(),
            locales: Vec::new(),
            patch_types: vec![PatchType::Complete],
            from: None,
            ftp_server_from: None,
            ftp_server_to: None,
            mar_channel_ids: None,
        }
    }

    pub fn locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    pub fn patch_types<I>(mut self, patch_types: I) -> Self
    where
        I: IntoIterator<Item = PatchType>,
    {
        self.patch_types = patch_types.into_iter().collect();
        self
    }

    /// Make this a full test updating from `from`.
    pub fn from_path(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn ftp_servers(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.ftp_server_from = Some(from.into());
        self.ftp_server_to = Some(to.into());
        self
    }

    pub fn mar_channel_ids(mut self, ids: impl Into<String>) -> Self {
        self.mar_channel_ids = Some(ids.into());
        self
    }

    pub(crate) fn into_release(self) -> Release {
        let mut release = Release {
            release: self.release,
            build_id: self.build_id,
            platform: self.platform,
            locales: Vec::with_capacity(self.locales.len()),
            patch_types: self.patch_types,
            from: self.from,
            ftp_server_from: self.ftp_server_from,
            ftp_server_to: self.ftp_server_to,
            mar_channel_ids: self.mar_channel_ids,
        };
        release.merge_locales(self.locales);
        release
    }
}

impl From<&Release> for NewRelease {
    /// Same fields, no locales.
    fn from(release: &Release) -> Self {
        Self {
            release: release.release.clone(),
            build_id: release.build_id.clone(),
            platform: release.platform.clone(),
            locales: Vec::new(),
            patch_types: release.patch_types.clone(),
            from: release.from.clone(),
            ftp_server_from: release.ftp_server_from.clone(),
            ftp_server_to: release.ftp_server_to.clone(),
            mar_channel_ids: release.mar_channel_ids.clone(),
        }
    }
}
