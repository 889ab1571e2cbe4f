//! Anonymous identifier type with format validation
//!
//! An [`Auid`] is the printable token that replaces a netid in anonymized
//! output. Its shape is fixed: two Base32 characters in their native case,
//! then two lowercase Base32 groups of five and six characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Total length of an auid token, separators included
pub const AUID_LEN: usize = 15;

/// Anonymous identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use anon_csv::domain::ids::Auid;
/// use std::str::FromStr;
///
/// let auid = Auid::from_str("JZ-gfzhz-4ui5ey").unwrap();
/// assert_eq!(auid.as_str(), "JZ-gfzhz-4ui5ey");
///
/// assert!(Auid::from_str("jz-GFZHZ-4ui5ey").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Auid(String);

impl Auid {
    /// Creates a new Auid, validating the token shape
    ///
    /// # Returns
    ///
    /// Returns `Ok(Auid)` if the token has the `XX-xxxxx-xxxxxx` shape, `Err` otherwise
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        if !is_well_formed(&token) {
            return Err(format!(
                "Invalid auid format. Expected XX-xxxxx-xxxxxx over the Base32 alphabet, got: {token}"
            ));
        }
        Ok(Self(token))
    }

    /// Wraps a token produced by the derivation without re-validating it
    pub(crate) fn from_derived(token: String) -> Self {
        debug_assert!(is_well_formed(&token), "derived auid is malformed: {token}");
        Self(token)
    }

    /// Returns the auid as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks `^[A-Za-z2-7]{2}-[a-z2-7]{5}-[a-z2-7]{6}$`
fn is_well_formed(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() != AUID_LEN || bytes[2] != b'-' || bytes[8] != b'-' {
        return false;
    }

    let lower = |b: &u8| b.is_ascii_lowercase() || (b'2'..=b'7').contains(b);
    let head = |b: &u8| lower(b) || b.is_ascii_uppercase();

    bytes[..2].iter().all(head) && bytes[3..8].iter().all(lower) && bytes[9..].iter().all(lower)
}

impl fmt::Display for Auid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Auid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Auid {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Auid> for String {
    fn from(auid: Auid) -> Self {
        auid.0
    }
}

impl AsRef<str> for Auid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("JZ-gfzhz-4ui5ey" ; "known token")]
    #[test_case("aa-22222-777777" ; "lowercase head")]
    #[test_case("Zq-abcde-fghijk" ; "mixed case head")]
    fn test_valid_auid(token: &str) {
        let auid = Auid::new(token).unwrap();
        assert_eq!(auid.as_str(), token);
        assert_eq!(auid.to_string(), token);
    }

    #[test_case("" ; "empty")]
    #[test_case("JZ-gfzhz-4ui5e" ; "too short")]
    #[test_case("JZ-gfzhz-4ui5eyy" ; "too long")]
    #[test_case("JZ_gfzhz_4ui5ey" ; "wrong separator")]
    #[test_case("JZ-GFZHZ-4ui5ey" ; "uppercase middle")]
    #[test_case("JZ-gfzhz-4ui5e1" ; "digit outside alphabet")]
    #[test_case("J8-gfzhz-4ui5ey" ; "eight in head")]
    #[test_case("JZ-gfzhz-4uié5" ; "non ascii")]
    fn test_invalid_auid(token: &str) {
        assert!(Auid::new(token).is_err());
    }

    #[test]
    fn test_auid_serde_roundtrip_validates() {
        let auid = Auid::new("XW-n2k5h-5rs2sw").unwrap();
        let json = serde_json::to_string(&auid).unwrap();
        assert_eq!(json, "\"XW-n2k5h-5rs2sw\"");

        let parsed: Auid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, auid);

        assert!(serde_json::from_str::<Auid>("\"not-an-auid\"").is_err());
    }
}
