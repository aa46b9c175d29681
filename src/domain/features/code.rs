//! Feature code value object.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Canonical identifier for one clinical or demographic feature (e.g. `RIDAGEYR`).
///
/// Codes defined by the schema are `'static`; codes arriving from the
/// prediction service are owned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureCode(Cow<'static, str>);

impl FeatureCode {
    /// Creates a code from a string known at compile time.
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Creates a code from an owned or borrowed string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FeatureCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FeatureCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FeatureCode {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for FeatureCode {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_owned_codes_compare_equal() {
        assert_eq!(FeatureCode::from_static("BMXBMI"), FeatureCode::new("BMXBMI"));
    }

    #[test]
    fn feature_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&FeatureCode::from_static("LBXGH")).unwrap();
        assert_eq!(json, "\"LBXGH\"");
    }

    #[test]
    fn feature_code_displays_raw_code() {
        assert_eq!(FeatureCode::from_static("SMQ040").to_string(), "SMQ040");
    }
}
