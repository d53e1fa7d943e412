//! ID types for the rugby game API.
//!
//! The gateway is inconsistent about id encoding: the same id can arrive as a
//! JSON number in one payload and as a numeric string in another. Every id
//! newtype accepts both on the way in and serializes as a number.

use crate::error::{BrError, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric id that may be encoded as a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_raw_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse::<u64>().map_err(de::Error::custom),
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = BrError;

            fn from_str(s: &str) -> Result<Self> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize_raw_id(deserializer).map(Self)
            }
        }
    };
}

numeric_id!(
    /// Type-safe wrapper for club (team) ids.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use brtools::TeamId;
    ///
    /// let team_id: TeamId = "4321".parse().unwrap();
    /// assert_eq!(team_id.as_u64(), 4321);
    /// assert_eq!(team_id.to_string(), "4321");
    /// ```
    TeamId
);

numeric_id!(
    /// Type-safe wrapper for league ids.
    LeagueId
);

numeric_id!(
    /// Type-safe wrapper for player ids.
    PlayerId
);

numeric_id!(
    /// Type-safe wrapper for fixture ids.
    FixtureId
);

/// Opaque per-user access credential presented to the gateway.
///
/// Never validated client-side and never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKey(***)")
    }
}

impl FromStr for AccessKey {
    type Err = BrError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_id_from_number_and_string() {
        let from_number: TeamId = serde_json::from_value(json!(1234)).unwrap();
        let from_string: TeamId = serde_json::from_value(json!("1234")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_u64(), 1234);
    }

    #[test]
    fn test_team_id_rejects_garbage() {
        let result: std::result::Result<TeamId, _> = serde_json::from_value(json!("abc"));
        assert!(result.is_err());
    }

    #[test]
    fn test_ids_serialize_as_numbers() {
        let value = serde_json::to_value(LeagueId::new(77)).unwrap();
        assert_eq!(value, json!(77));
    }

    #[test]
    fn test_from_str_trims() {
        let id: FixtureId = " 99 ".parse().unwrap();
        assert_eq!(id, FixtureId::new(99));
        assert!("x".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_access_key_debug_is_redacted() {
        let key = AccessKey::new("secret-key");
        assert_eq!(format!("{:?}", key), "AccessKey(***)");
        assert_eq!(key.as_str(), "secret-key");
    }
}
