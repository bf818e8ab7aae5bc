//! Value quoting for textual join conditions.
//!
//! Join conditions are raw SQL text, so every value interpolated into them
//! must be quoted first. [`QuotedValue`] and [`QuotedList`] can only be
//! created by a [`Quoter`]; the condition builders in [`crate::filter`]
//! accept nothing else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::segment::SegmentId;

/// A scalar that can be quoted into a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// Unsigned integer (ids).
    Int(u64),
    /// Text (relation field names).
    Text(String),
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<SegmentId> for SqlValue {
    fn from(value: SegmentId) -> Self {
        Self::Int(value.0)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A literal produced by a [`Quoter`], safe for direct interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedValue(String);

impl QuotedValue {
    /// Returns the quoted literal.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuotedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A list of literals produced by a [`Quoter`]. Displays comma separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedList(Vec<QuotedValue>);

impl QuotedList {
    /// Number of literals in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no literal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the quoted literals.
    pub fn iter(&self) -> impl Iterator<Item = &QuotedValue> {
        self.0.iter()
    }
}

impl fmt::Display for QuotedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(value.as_str())?;
        }
        Ok(())
    }
}

/// Quoting collaborator.
///
/// Implementors only provide [`Quoter::literal`]; the wrapping methods are
/// the only way to obtain [`QuotedValue`] and [`QuotedList`].
pub trait Quoter: Send + Sync {
    /// Renders `value` as an injection-safe SQL literal.
    fn literal(&self, value: &SqlValue) -> String;

    /// Quotes a single scalar.
    fn quote(&self, value: &SqlValue) -> QuotedValue {
        QuotedValue(self.literal(value))
    }

    /// Quotes every element of `values`, keeping order.
    fn quote_list(&self, values: &[SqlValue]) -> QuotedList {
        QuotedList(values.iter().map(|v| self.quote(v)).collect())
    }
}

/// MariaDB/MySQL quoting: integers verbatim, text in single quotes.
///
/// Single quotes are doubled and backslashes escaped. The output cannot
/// break out of the literal under either escaping mode, but under ANSI or
/// `NO_BACKSLASH_ESCAPES` semantics a backslash is stored doubled.
#[derive(Debug, Clone, Copy, Default)]
pub struct MariaDbQuoter;

impl Quoter for MariaDbQuoter {
    fn literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Int(i) => i.to_string(),
            SqlValue::Text(text) => {
                let mut out = String::with_capacity(text.len() + 2);
                out.push('\'');
                for c in text.chars() {
                    match c {
                        '\'' => out.push_str("''"),
                        '\\' => out.push_str("\\\\"),
                        '\0' => out.push_str("\\0"),
                        _ => out.push(c),
                    }
                }
                out.push('\'');
                out
            }
        }
    }
}
