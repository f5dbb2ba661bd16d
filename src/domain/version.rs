use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

/// Leading dotted-numeric prefix of a runtime version string ("8.2.4-1ubuntu" -> "8.2.4").
static VERSION_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*").expect("version prefix regex is valid"));

/// A simple version struct for parsing and comparing version strings (e.g. "1.2.3").
///
/// Missing trailing segments compare as zero, so "8.2" equals "8.2.0".
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    /// Parse a version string into a `Version` object.
    ///
    /// Returns `None` if the string contains non-numeric segments.
    pub fn parse(s: &str) -> Option<Self> {
        let parts = s
            .trim()
            .split('.')
            .map(|segment| segment.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        Some(Self { parts })
    }

    /// Extract the leading numeric version from a full runtime version string.
    pub fn extract(full: &str) -> Option<String> {
        VERSION_PREFIX_RE.find(full.trim()).map(|m| m.as_str().to_string())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.parts.len().max(other.parts.len());
        for idx in 0..max_len {
            let left_value = *self.parts.get(idx).unwrap_or(&0);
            let right_value = *other.parts.get(idx).unwrap_or(&0);
            match left_value.cmp(&right_value) {
                Ordering::Less => return Ordering::Less,
                Ordering::Greater => return Ordering::Greater,
                Ordering::Equal => {}
            }
        }
        Ordering::Equal
    }
}

/// Outcome of comparing the running PHP version against a minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    /// Full version string as reported by the runtime.
    pub full: String,
    /// Extracted dotted-numeric version.
    pub current: String,
    pub minimum: String,
    pub supported: bool,
}

impl VersionCheck {
    /// Compare a full runtime version string against `minimum`.
    ///
    /// An unparseable current or minimum version is reported as unsupported.
    pub fn evaluate(full: &str, minimum: &str) -> Self {
        let current = Version::extract(full).unwrap_or_default();
        let supported = match (Version::parse(&current), Version::parse(minimum)) {
            (Some(current), Some(minimum)) => current >= minimum,
            _ => false,
        };

        Self {
            full: full.trim().to_string(),
            current,
            minimum: minimum.to_string(),
            supported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse() {
        assert_eq!(Version::parse("1.2.3").unwrap().parts, vec![1, 2, 3]);
        assert_eq!(Version::parse("1.0").unwrap().parts, vec![1, 0]);
        assert_eq!(Version::parse("10.20.30").unwrap().parts, vec![10, 20, 30]);
        assert!(Version::parse("invalid").is_none());
        assert!(Version::parse("1.a.2").is_none());
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Version::parse("1.2.3").unwrap().cmp(&Version::parse("1.2.3").unwrap()),
            Ordering::Equal
        );
        assert!(Version::parse("1.2.4").unwrap() > Version::parse("1.2.3").unwrap());
        assert!(Version::parse("2.0.0").unwrap() > Version::parse("1.2.3").unwrap());
        assert!(Version::parse("1.2.3.1").unwrap() > Version::parse("1.2.3").unwrap());
        assert!(Version::parse("1.1.9").unwrap() < Version::parse("1.2.3").unwrap());
        assert!(Version::parse("1.10").unwrap() > Version::parse("1.9").unwrap());
        assert_eq!(Version::parse("8.2").unwrap(), Version::parse("8.2.0").unwrap());
    }

    #[test]
    fn test_extract() {
        assert_eq!(Version::extract("8.2.4-1ubuntu2.1").as_deref(), Some("8.2.4"));
        assert_eq!(Version::extract("8.3.0RC1").as_deref(), Some("8.3.0"));
        assert_eq!(Version::extract("  8.1.27\n").as_deref(), Some("8.1.27"));
        assert_eq!(Version::extract("dev"), None);
    }

    #[test]
    fn test_evaluate_supported() {
        let check = VersionCheck::evaluate("8.2.4", "8.2.0");
        assert!(check.supported);
        assert_eq!(check.current, "8.2.4");
        assert_eq!(check.minimum, "8.2.0");
    }

    #[test]
    fn test_evaluate_unsupported() {
        let check = VersionCheck::evaluate("7.4.0", "8.0.0");
        assert!(!check.supported);
    }

    #[test]
    fn test_evaluate_keeps_full_string() {
        let check = VersionCheck::evaluate("8.3.1-dev", "8.2");
        assert_eq!(check.full, "8.3.1-dev");
        assert_eq!(check.current, "8.3.1");
        assert!(check.supported);
    }

    #[test]
    fn test_evaluate_unparseable_is_unsupported() {
        assert!(!VersionCheck::evaluate("unknown", "8.0.0").supported);
        assert!(!VersionCheck::evaluate("8.2.0", "eight").supported);
    }

    proptest! {
        #[test]
        fn supported_matches_segment_order(
            current in prop::collection::vec(0u64..40, 1..4),
            minimum in prop::collection::vec(0u64..40, 1..4),
        ) {
            let join = |parts: &[u64]| {
                parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".")
            };
            let check = VersionCheck::evaluate(&join(&current), &join(&minimum));

            let len = current.len().max(minimum.len());
            let pad = |parts: &[u64]| {
                let mut padded = parts.to_vec();
                padded.resize(len, 0);
                padded
            };
            prop_assert_eq!(check.supported, pad(&current) >= pad(&minimum));
        }
    }
}
