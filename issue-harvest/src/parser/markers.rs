//! Parser driven by a configured list of markers.

use super::patterns::{first_email, FieldPattern};
use super::ParsedFields;

/// Extracts one field per marker, in order, optionally followed by the
/// first email address.
#[derive(Debug, Clone)]
pub struct MarkerParser {
    fields: Vec<FieldPattern>,
    include_email: bool,
}

impl MarkerParser {
    /// Builds a parser for the given markers.
    pub fn new<I, S>(markers: I, include_email: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: markers
                .into_iter()
                .map(|m| FieldPattern::literal(m.as_ref()))
                .collect(),
            include_email,
        }
    }

    /// Markers in column order.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldPattern::marker)
    }

    /// Extracts the configured fields from `body`.
    #[must_use]
    pub fn parse(&self, body: &str) -> ParsedFields {
        let mut fields: ParsedFields = self.fields.iter().map(|f| f.extract(body)).collect();
        if self.include_email {
            fields.push(first_email(body));
        }
        fields
    }
}
