//! Line grammar for update verify configs.
//!
//! A line is a whitespace-separated sequence of `key="value"` assignments.
//! Values are quote-delimited so they may contain spaces. Either quote
//! character may delimit a value; output uses double quotes unless the value
//! holds one.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseErrorKind;

/// Every key the format recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Product,
    Channel,
    AusServer,
    To,
    ToBuildId,
    ToDisplayVersion,
    ToAppVersion,
    Release,
    BuildId,
    Platform,
    Locales,
    PatchTypes,
    From,
    FtpServerFrom,
    FtpServerTo,
    MarChannelIds,
}

impl Key {
    /// Config-level keys in write order.
    pub const SCALARS: [Key; 7] = [
        Key::Product,
        Key::Channel,
        Key::AusServer,
        Key::To,
        Key::ToBuildId,
        Key::ToDisplayVersion,
        Key::ToAppVersion,
    ];

    /// Release keys in write order.
    pub const RELEASE: [Key; 9] = [
        Key::Release,
        Key::BuildId,
        Key::Platform,
        Key::Locales,
        Key::PatchTypes,
        Key::From,
        Key::FtpServerFrom,
        Key::FtpServerTo,
        Key::MarChannelIds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::Product => "product",
            Key::Channel => "channel",
            Key::AusServer => "aus_server",
            Key::To => "to",
            Key::ToBuildId => "to_build_id",
            Key::ToDisplayVersion => "to_display_version",
            Key::ToAppVersion => "to_app_version",
            Key::Release => "release",
            Key::BuildId => "build_id",
            Key::Platform => "platform",
            Key::Locales => "locales",
            Key::PatchTypes => "patch_types",
            Key::From => "from",
            Key::FtpServerFrom => "ftp_server_from",
            Key::FtpServerTo => "ftp_server_to",
            Key::MarChannelIds => "mar_channel_IDs",
        }
    }

    pub fn from_name(name: &str) -> Option<Key> {
        Self::SCALARS
            .iter()
            .chain(Self::RELEASE.iter())
            .copied()
            .find(|key| key.name() == name)
    }

    pub fn is_scalar(self) -> bool {
        Self::SCALARS.contains(&self)
    }
}

/// One parsed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: Key,
    pub value: String,
}

static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Leading `key`, `=` and opening quote of text that failed to match.
static PARTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\w*)(=?)(["']?)"#).unwrap());

/// Parse one line into its assignments, in source order.
///
/// Assignments must cover the line with only whitespace between them. A
/// blank line yields no assignments.
pub fn parse_line(line: &str) -> Result<Vec<Assignment>, ParseErrorKind> {
    let mut seen = HashSet::new();
    let mut assignments = Vec::new();
    let mut pos = 0;

    for caps in ASSIGNMENT_RE.captures_iter(line) {
        let whole = caps.get(0).unwrap();
        check_gap(line, pos, whole.start())?;
        pos = whole.end();

        let name = &caps[1];
        let key = Key::from_name(name).ok_or_else(|| ParseErrorKind::UnknownKey(name.into()))?;
        if !seen.insert(key) {
            return Err(ParseErrorKind::DuplicateKey(name.into()));
        }
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        assignments.push(Assignment {
            key,
            value: value.to_string(),
        });
    }
    check_gap(line, pos, line.len())?;

    Ok(assignments)
}

/// Reject anything but whitespace in `line[start..end]`.
///
/// A gap directly after a value (`start > 0`) must open with whitespace.
fn check_gap(line: &str, start: usize, end: usize) -> Result<(), ParseErrorKind> {
    let gap = &line[start..end];
    if start > 0 && !gap.is_empty() && !gap.starts_with(char::is_whitespace) {
        return Err(malformed(start, "expected whitespace after value"));
    }
    if start > 0 && gap.is_empty() && end < line.len() {
        return Err(malformed(start, "expected whitespace after value"));
    }
    let rest = gap.trim_start();
    if rest.is_empty() {
        return Ok(());
    }
    let at = start + (gap.len() - rest.len());
    Err(diagnose(rest, at))
}

/// Explain why `rest` (starting at byte `at`) is not an assignment.
fn diagnose(rest: &str, at: usize) -> ParseErrorKind {
    let caps = PARTIAL_RE.captures(rest).unwrap();
    let name = &caps[1];
    if name.is_empty() {
        return malformed(at, "expected key");
    }
    if Key::from_name(name).is_none() {
        return ParseErrorKind::UnknownKey(name.into());
    }
    let after_name = at + name.len();
    if caps[2].is_empty() {
        return malformed(after_name, "expected '=' after key");
    }
    if caps[3].is_empty() {
        return malformed(after_name + 1, "expected quoted value");
    }
    malformed(after_name + 1, "unterminated quoted value")
}

/// Render one assignment the way [`parse_line`] reads it back.
///
/// Values holding a double quote are single-quoted. Check values with
/// [`check_value`] first.
pub fn format_assignment(key: Key, value: &str) -> String {
    if value.contains('"') {
        format!("{}='{}'", key.name(), value)
    } else {
        format!("{}=\"{}\"", key.name(), value)
    }
}

/// Whether `value` can be written so that [`parse_line`] reads it back.
pub fn check_value(value: &str) -> Result<(), &'static str> {
    if value.contains('\n') || value.contains('\r') {
        return Err("contains a line break");
    }
    if value.contains('"') && value.contains('\'') {
        return Err("contains both quote characters");
    }
    Ok(())
}

fn malformed(offset: usize, reason: &'static str) -> ParseErrorKind {
    ParseErrorKind::Malformed {
        column: offset + 1,
        reason,
    }
}
