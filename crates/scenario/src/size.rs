//! Memory and disk size specs such as `"16GiB"` or `"120 GiB"`.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static SIZE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn size_pattern() -> &'static Regex {
    SIZE_PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\s?([A-Za-z]+)$").expect("size pattern is a valid regex")
    })
}

/// An amount plus the unit it is expressed in, passed through to the
/// control plane untouched (libvirt understands `KiB`, `MiB`, `GiB`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec {
    /// Integer amount
    pub amount: u64,
    /// Unit suffix, e.g. `GiB`
    pub unit: String,
}

impl SizeSpec {
    /// Create a size spec.
    pub fn new(amount: u64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }
}

impl FromStr for SizeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = size_pattern()
            .captures(s)
            .ok_or_else(|| Error::InvalidSize(s.to_string()))?;

        let amount = captures[1]
            .parse::<u64>()
            .map_err(|_| Error::InvalidSize(s.to_string()))?;

        Ok(Self::new(amount, &captures[2]))
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact() {
        let spec: SizeSpec = "16GiB".parse().unwrap();
        assert_eq!(spec, SizeSpec::new(16, "GiB"));
    }

    #[test]
    fn test_parse_with_space() {
        let spec: SizeSpec = "120 GiB".parse().unwrap();
        assert_eq!(spec, SizeSpec::new(120, "GiB"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let inputs = [
            "",
            "GiB",
            "16  GiB",
            "1.5GiB",
            "-4GiB",
            "16 GiB extra",
            " 16GiB",
            "16",
            "120",
            "16G1B",
        ];
        for input in inputs {
            assert!(
                matches!(input.parse::<SizeSpec>(), Err(Error::InvalidSize(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let result = "99999999999999999999999GiB".parse::<SizeSpec>();
        assert!(matches!(result, Err(Error::InvalidSize(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(SizeSpec::new(120, "GiB").to_string(), "120GiB");
    }
}
