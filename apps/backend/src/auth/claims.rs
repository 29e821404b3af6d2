//! Identity carried inside session tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller identity signed into a session token.
///
/// `email` is the only field the server relies on. Any other fields the
/// caller supplied at issuance travel along unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdentityClaim {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaim {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }
}
