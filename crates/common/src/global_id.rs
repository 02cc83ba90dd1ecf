//! Opaque node identifiers.
//!
//! A global id is the standard base64 encoding of `"{type_name}:{id}"`, which
//! lets a single `node` lookup address users, polls and votes alike.

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{AppError, AppResult};

/// A decoded global id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalId {
    /// Entity type name, e.g. `Poll`.
    pub type_name: String,
    /// Local identifier within that type's collection.
    pub id: String,
}

impl GlobalId {
    /// Build a global id from a type name and local id.
    pub fn new(type_name: impl Into<String>, id: impl ToString) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.to_string(),
        }
    }

    /// Encode to the opaque string form.
    #[must_use]
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.type_name, self.id))
    }

    /// Decode the opaque string form.
    pub fn decode(encoded: &str) -> AppResult<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| AppError::BadRequest(format!("Invalid global id {encoded}: {e}")))?;
        let raw = String::from_utf8(bytes)
            .map_err(|_| AppError::BadRequest(format!("Invalid global id {encoded}")))?;

        match raw.split_once(':') {
            Some((type_name, id)) if !type_name.is_empty() && !id.is_empty() => {
                Ok(Self::new(type_name, id))
            }
            _ => Err(AppError::BadRequest(format!(
                "Global id {encoded} is not of the form Type:id"
            ))),
        }
    }

    /// Parse the local id as a numeric identifier.
    pub fn numeric_id(&self) -> AppResult<u64> {
        self.id
            .parse()
            .map_err(|_| AppError::BadRequest(format!("{} id is not numeric: {}", self.type_name, self.id)))
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
