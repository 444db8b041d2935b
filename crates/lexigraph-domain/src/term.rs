//! Term module - canonical glossary entries

use std::fmt;

/// Opaque identifier for a term.
///
/// Ids are minted by the glossary authority (currently UUIDv4 strings) but
/// nothing outside that authority may rely on the format. Everywhere else
/// they are compared byte-for-byte and passed through unchanged, so the
/// newtype deliberately exposes no parsing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(String);

impl TermId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, yielding the raw string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// An empty id is never valid; callers use this for request validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TermId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TermId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A canonical glossary entry.
///
/// The glossary authority owns these; `name` is unique within it. The
/// relationship graph references terms only by [`TermId`] and never embeds
/// this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Unique identifier, minted at creation
    pub id: TermId,

    /// Human-readable name, unique within the glossary
    pub name: String,

    /// Definition text
    pub definition: String,

    /// Optional citation for where the definition came from
    pub source_url: Option<String>,
}

impl Term {
    /// Create a term with no source citation.
    pub fn new(id: TermId, name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            definition: definition.into(),
            source_url: None,
        }
    }

    /// Attach a source citation.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: wrapping a string in a TermId never alters it
        #[test]
        fn test_term_id_preserves_input(s in ".*") {
            let id = TermId::new(s.clone());
            prop_assert_eq!(id.as_str(), s.as_str());
            prop_assert_eq!(id.clone().into_string(), s);
        }

        /// Property: equality of ids matches equality of the raw strings
        #[test]
        fn test_term_id_equality(a in ".*", b in ".*") {
            let id_a = TermId::new(a.clone());
            let id_b = TermId::new(b.clone());
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
