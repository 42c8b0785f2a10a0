use once_cell::sync::Lazy;
use regex::Regex;
use regex::RegexBuilder;

use crate::error::FatalError;

static VERSION_LINE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r#"^version = "(\d\.\d\.\d)"$"#)
        .multi_line(true)
        .build()
        .unwrap()
});

/// Locates the version field within one manifest file.
///
/// Both variants capture the dotted components as an opaque string; no
/// numeric validation happens here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionPattern {
    /// A standalone `version = "X.Y.Z"` line.
    Line,
    /// A `version` line directly below `name = "<package>"`.
    ///
    /// Lock files list one version field per dependency; the name line is
    /// the context that picks out the right one.
    Anchored { package: String },
}

impl VersionPattern {
    pub fn line() -> Self {
        VersionPattern::Line
    }

    pub fn anchored(package: impl Into<String>) -> Self {
        VersionPattern::Anchored {
            package: package.into(),
        }
    }

    fn to_regex(&self) -> Result<Regex, FatalError> {
        match self {
            VersionPattern::Line => Ok(VERSION_LINE.clone()),
            VersionPattern::Anchored { package } => {
                let pattern = format!(
                    r#"name = "{}"\nversion = "(\d\.\d\.\d)""#,
                    regex::escape(package)
                );
                let regex = RegexBuilder::new(&pattern).multi_line(true).build()?;
                Ok(regex)
            }
        }
    }
}

/// Extract the version from `text`, binding to the first match.
pub fn read_version(text: &str, pattern: &VersionPattern) -> Result<String, FatalError> {
    let regex = pattern.to_regex()?;
    let captures = regex
        .captures(text)
        .ok_or_else(|| FatalError::VersionNotFound(regex.as_str().to_owned()))?;
    let version = captures.get(1).expect("pattern has a version group");
    Ok(version.as_str().to_owned())
}

/// Return a copy of `text` with `version` spliced into the first match.
///
/// Only the bytes of the matched version components are rewritten; all
/// surrounding content, the anchor line included, comes through untouched.
pub fn write_version(
    text: &str,
    pattern: &VersionPattern,
    version: &str,
) -> Result<String, FatalError> {
    let regex = pattern.to_regex()?;
    let captures = regex
        .captures(text)
        .ok_or_else(|| FatalError::VersionNotFound(regex.as_str().to_owned()))?;
    let span = captures.get(1).expect("pattern has a version group").range();

    let mut updated = text.to_owned();
    updated.replace_range(span, version);
    Ok(updated)
}
