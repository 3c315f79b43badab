//! Field extraction from issue bodies.
//!
//! A [`Parser`] maps an issue body to an ordered list of field strings. The
//! extraction pipeline is agnostic of which policy is in use; the caller
//! picks one and keeps the CSV column order in line with it.
//!
//! Every policy is total: fields that cannot be found come back as empty
//! strings.

mod markers;
mod patterns;

pub use markers::MarkerParser;
pub use patterns::{first_email, FieldPattern};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Ordered fields extracted from one issue body.
pub type ParsedFields = Vec<String>;

/// Signature of a caller-supplied extraction function.
pub type ParseFn = dyn Fn(&str) -> ParsedFields + Send + Sync;

/// Extraction strategy applied to each issue body.
#[derive(Clone)]
pub enum Parser {
    /// `[user name, id, email]` from merchant tickets.
    Merchant,

    /// `[message, email]`.
    Message,

    /// Configured markers, optionally followed by the email.
    Markers(MarkerParser),

    /// Any caller-supplied function.
    Custom(Arc<ParseFn>),
}

impl Parser {
    /// Wraps a function as a parser.
    pub fn custom(f: impl Fn(&str) -> ParsedFields + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Extracts the fields from `body`.
    #[must_use]
    pub fn parse(&self, body: &str) -> ParsedFields {
        match self {
            Self::Merchant => vec![
                patterns::USER_NAME.extract(body),
                patterns::ID.extract(body),
                first_email(body),
            ],
            Self::Message => vec![patterns::MESSAGE.extract(body), first_email(body)],
            Self::Markers(markers) => markers.parse(body),
            Self::Custom(f) => f(body),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merchant => f.write_str("Merchant"),
            Self::Message => f.write_str("Message"),
            Self::Markers(markers) => f.debug_tuple("Markers").field(markers).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Parser policies selectable by name from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Merchant,
    Message,
    Markers,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merchant" => Ok(Self::Merchant),
            "message" => Ok(Self::Message),
            "markers" => Ok(Self::Markers),
            other => Err(format!(
                "unknown parser policy '{other}', expected merchant, message or markers"
            )),
        }
    }
}
