//! Identity types for iotframe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identity issued to a device when it joins the relay.
///
/// UUID v4, rendered in hyphenated form on the wire (`Uuid` header,
/// `content` of the identity response).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceToken(uuid::Uuid);

impl DeviceToken {
    /// Create a new random DeviceToken.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl fmt::Debug for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceToken({})", &self.to_string()[..8])
    }
}

/// Header value was not a device token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid device token: {0:?}")]
pub struct ParseTokenError(pub String);

impl FromStr for DeviceToken {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::try_parse(s.trim())
            .map(Self)
            .map_err(|_| ParseTokenError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_token_is_uuid_v4() {
        let token = DeviceToken::random();
        assert_eq!(token.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn device_tokens_are_distinct() {
        assert_ne!(DeviceToken::random(), DeviceToken::random());
    }

    #[test]
    fn display_parses_back() {
        let token = DeviceToken::random();
        let shown = token.to_string();
        assert_eq!(shown.len(), 36);
        assert_eq!(shown.parse::<DeviceToken>().unwrap(), token);
    }

    #[test]
    fn parse_trims_whitespace() {
        let token = DeviceToken::random();
        let padded = format!("  {token} ");
        assert_eq!(padded.parse::<DeviceToken>().unwrap(), token);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<DeviceToken>().is_err());
        assert!("not-a-token".parse::<DeviceToken>().is_err());
        let err = "abc".parse::<DeviceToken>().unwrap_err();
        assert_eq!(err, ParseTokenError("abc".into()));
    }

    #[test]
    fn debug_is_abbreviated() {
        let token = DeviceToken::random();
        let debug = format!("{token:?}");
        assert!(debug.starts_with("DeviceToken("));
        assert_eq!(debug.len(), "DeviceToken()".len() + 8);
    }
}
