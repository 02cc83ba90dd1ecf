//! Entity definitions.

pub mod poll;
pub mod user;
pub mod vote;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub use poll::Poll;
pub use user::{PrivateField, User};
pub use vote::Vote;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Entity type name used in global ids and error messages.
            pub const TYPE_NAME: &'static str = $type_name;

            /// Raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
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
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer)?
                    .into_u64()
                    .map(Self)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

entity_id!(
    /// User identifier.
    UserId,
    "User"
);
entity_id!(
    /// Poll identifier.
    PollId,
    "Poll"
);
entity_id!(
    /// Vote identifier.
    VoteId,
    "Vote"
);

/// Ids arrive either as numbers or as numeric strings in imported records.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_u64(self) -> Result<u64, String> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("invalid id {s:?}: expected a non-negative integer")),
        }
    }
}
