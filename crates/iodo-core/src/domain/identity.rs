//! Client identity string classification.
//!
//! The identity string is the raw client descriptor (a user-agent style
//! string). This is the only place in the core that does pattern matching on
//! free-form text.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `OS <major>_<minor>[_<patch>]` as embedded in mobile identity strings.
static OS_VERSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"OS (\d+)_(\d+)_?(\d+)?").ok());

/// Dotted three-part operating system version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for OsVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.').map(str::parse::<u32>);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch)), None) => {
                Ok(Self::new(major, minor, patch))
            }
            _ => Err(format!("'{s}' is not a dotted three-part version")),
        }
    }
}

impl Serialize for OsVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OsVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Operating system family a client identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Ios,
    Android,
    Macos,
    Windows,
    Linux,
    Other,
}

/// Client engine family derived from the identity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserFamily {
    Chrome,
    Safari,
    Other,
}

/// Extract the OS version from an identity string.
///
/// A missing patch segment defaults to `0`. Returns `None` when the string
/// carries no recognizable version or a segment does not fit in a `u32`.
pub fn parse_os_version(identity: &str) -> Option<OsVersion> {
    let pattern = OS_VERSION_PATTERN.as_ref()?;
    let captures = pattern.captures(identity)?;
    let major = captures.get(1)?.as_str().parse().ok()?;
    let minor = captures.get(2)?.as_str().parse().ok()?;
    let patch = match captures.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some(OsVersion::new(major, minor, patch))
}

/// Classify the platform family from an identity string.
pub fn classify_platform(identity: &str) -> PlatformFamily {
    let contains_any = |needles: &[&str]| needles.iter().any(|n| identity.contains(n));

    if contains_any(&["iPhone", "iPad", "iPod"]) {
        PlatformFamily::Ios
    } else if identity.contains("Android") {
        PlatformFamily::Android
    } else if contains_any(&["Macintosh", "Mac OS X", "macOS"]) {
        PlatformFamily::Macos
    } else if identity.contains("Windows") {
        PlatformFamily::Windows
    } else if identity.contains("Linux") {
        PlatformFamily::Linux
    } else {
        PlatformFamily::Other
    }
}

/// Classify the client engine from an identity string.
pub fn classify_browser(identity: &str) -> BrowserFamily {
    if identity.contains("CriOS") || identity.contains("Chrome") {
        BrowserFamily::Chrome
    } else if identity.contains("Safari") {
        BrowserFamily::Safari
    } else {
        BrowserFamily::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_IOS_14: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_4_2 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1";
    const IPAD_NO_PATCH: &str = "Mozilla/5.0 (iPad; CPU OS 16_1 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/119.0 Mobile/15E148 Safari/604.1";
    const DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    #[test]
    fn test_parse_full_version() {
        assert_eq!(parse_os_version(IPHONE_IOS_14), Some(OsVersion::new(14, 4, 2)));
    }

    #[test]
    fn test_missing_patch_defaults_to_zero() {
        assert_eq!(parse_os_version(IPAD_NO_PATCH), Some(OsVersion::new(16, 1, 0)));
    }

    #[test]
    fn test_no_version_in_desktop_identity() {
        assert_eq!(parse_os_version(DESKTOP_CHROME), None);
        assert_eq!(parse_os_version(""), None);
    }

    #[test]
    fn test_oversized_segment_is_not_a_version() {
        assert_eq!(parse_os_version("CPU OS 99999999999_1 like Mac OS X"), None);
    }

    #[test]
    fn test_classify_platform() {
        assert_eq!(classify_platform(IPHONE_IOS_14), PlatformFamily::Ios);
        assert_eq!(classify_platform(IPAD_NO_PATCH), PlatformFamily::Ios);
        assert_eq!(classify_platform(DESKTOP_CHROME), PlatformFamily::Windows);
        assert_eq!(
            classify_platform("Linux (Ubuntu 22.04); x86_64"),
            PlatformFamily::Linux
        );
        assert_eq!(classify_platform("Haiku R1"), PlatformFamily::Other);
    }

    #[test]
    fn test_classify_browser() {
        assert_eq!(classify_browser(IPHONE_IOS_14), BrowserFamily::Safari);
        assert_eq!(classify_browser(IPAD_NO_PATCH), BrowserFamily::Chrome);
        assert_eq!(classify_browser(DESKTOP_CHROME), BrowserFamily::Chrome);
        assert_eq!(classify_browser("curl/8.0"), BrowserFamily::Other);
    }

    #[test]
    fn test_version_display_and_parse() {
        let version = OsVersion::new(15, 2, 0);
        assert_eq!(version.to_string(), "15.2.0");
        assert_eq!("15.2.0".parse::<OsVersion>(), Ok(version));
        assert!("15.2".parse::<OsVersion>().is_err());
    }
}
