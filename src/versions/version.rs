use std::fmt;
use std::str::FromStr;

use crate::versions::error::ParseVersionError;

/// Dotted-numeric version of 2 to 4 components: `major.minor[.build[.revision]]`.
///
/// Components compare left to right, and a missing component sorts before
/// any present one, so `9.6 < 9.6.0 < 9.6.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MendixVersion {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl MendixVersion {
    pub fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: None,
        }
    }
}

fn parse_component(part: &str) -> Result<u32, ParseVersionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseVersionError::InvalidComponent(part.to_string()));
    }
    part.parse()
        .map_err(|_| ParseVersionError::InvalidComponent(part.to_string()))
}

impl FromStr for MendixVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(ParseVersionError::ComponentCount(parts.len()));
        }

        let components = parts
            .iter()
            .map(|p| parse_component(p))
            .collect::<Result<Vec<u32>, _>>()?;

        Ok(Self {
            major: components[0],
            minor: components[1],
            build: components.get(2).copied(),
            revision: components.get(3).copied(),
        })
    }
}

impl fmt::Display for MendixVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
        }
        if let Some(revision) = self.revision {
            write!(f, ".{}", revision)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("9.24.1", "9.24.1")]
    #[case("10.6", "10.6")]
    #[case("10.6.0.21589", "10.6.0.21589")]
    #[case("09.1.0", "9.1.0")] // leading zeros are not preserved
    fn test_parse_and_display(#[case] input: &str, #[case] expected: &str) {
        let version: MendixVersion = input.parse().unwrap();
        assert_eq!(version.to_string(), expected);
    }

    #[rstest]
    #[case("9", ParseVersionError::ComponentCount(1))]
    #[case("1.2.3.4.5", ParseVersionError::ComponentCount(5))]
    #[case("9.x.1", ParseVersionError::InvalidComponent("x".to_string()))]
    #[case("9..1", ParseVersionError::InvalidComponent("".to_string()))]
    #[case("9.-1", ParseVersionError::InvalidComponent("-1".to_string()))]
    #[case("9.+1", ParseVersionError::InvalidComponent("+1".to_string()))]
    #[case("9.99999999999", ParseVersionError::InvalidComponent("99999999999".to_string()))]
    fn test_parse_rejects_invalid(#[case] input: &str, #[case] expected: ParseVersionError) {
        assert_eq!(input.parse::<MendixVersion>(), Err(expected));
    }

    #[rstest]
    #[case("9.6.0", "9.24.1")] // numeric, not lexicographic
    #[case("9.6", "9.6.0")] // missing component sorts first
    #[case("9.6.0", "9.6.0.0")]
    #[case("9.24.1.999", "10.0.0")]
    fn test_ordering(#[case] lower: &str, #[case] higher: &str) {
        let lower: MendixVersion = lower.parse().unwrap();
        let higher: MendixVersion = higher.parse().unwrap();
        assert!(lower < higher);
    }
}
