//! Identifier newtypes for buyers, tokens, transactions and recipient emails
//!
//! Token and buyer identifiers are opaque: their case and format are chain
//! specific (checksummed EVM addresses, base58 Solana mints, ...), so they
//! are compared byte for byte and never normalized here.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::constants::EMAIL_PATTERN;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Buyer identity (wallet address, account id, ...)
    BuyerId
);

opaque_id!(
    /// Source or settlement asset identifier (token address, mint, ...)
    TokenId
);

opaque_id!(
    /// Transaction identifier returned by a chain adapter
    TxId
);

impl BuyerId {
    /// Check that the identifier has non-whitespace content
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

/// Recipient email address that passed format validation
///
/// # Examples
///
/// ```
/// use instacard::Email;
///
/// assert!(Email::parse("jane.doe+cards@example.com").is_some());
/// assert!(Email::parse("jane@localhost").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate against `^[a-zA-Z0-9._+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,10}$`
    pub fn parse(input: &str) -> Option<Self> {
        EMAIL_RE.is_match(input).then(|| Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
