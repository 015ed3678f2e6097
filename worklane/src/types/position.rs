//! Position types for task ordering using fractional indexing.

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Position of a task on the board: column + ordinal within the column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub column: ColumnId,
    pub ordinal: Ordinal,
}

impl Position {
    /// Create a new position
    pub fn new(column: ColumnId, ordinal: Ordinal) -> Self {
        Self { column, ordinal }
    }

    /// Create a position in a column with the default ordinal (at the start)
    pub fn in_column(column: ColumnId) -> Self {
        Self {
            column,
            ordinal: Ordinal::first(),
        }
    }
}

/// Ordering within a column. Uses fractional indexing.
///
/// Ordinals are strings that sort lexicographically to determine display
/// order. This allows a drag to insert between existing cards without
/// rewriting the other cards' positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordinal(String);

impl Ordinal {
    /// Ordinal at the start
    pub fn first() -> Self {
        Self("a0".to_string())
    }

    /// Ordinal after an existing ordinal
    pub fn after(last: &Ordinal) -> Self {
        let bytes = last.0.as_bytes();
        let mut result = last.0.clone();

        if let Some(&last_byte) = bytes.last() {
            let new_char = match last_byte {
                b'0'..=b'8' => (last_byte + 1) as char,
                b'9' => {
                    // 9 rolls over into the previous character
                    result.pop();
                    if result.is_empty() {
                        return Self("b0".to_string());
                    }
                    return Self::after(&Ordinal(result)).append_zero();
                }
                b'a'..=b'y' => (last_byte + 1) as char,
                b'z' => {
                    return Self(format!("{}0", last.0));
                }
                _ => '0',
            };
            result.pop();
            result.push(new_char);
        }

        Self(result)
    }

    fn append_zero(self) -> Self {
        Self(format!("{}0", self.0))
    }

    /// Ordinal between two existing ordinals (fractional index)
    pub fn between(before: &Ordinal, after: &Ordinal) -> Self {
        let before_bytes = before.0.as_bytes();
        let after_bytes = after.0.as_bytes();

        let max_len = before_bytes.len().max(after_bytes.len());
        let mut result = Vec::with_capacity(max_len + 1);

        for i in 0..max_len {
            let b = before_bytes.get(i).copied().unwrap_or(b'0');
            let a = after_bytes.get(i).copied().unwrap_or(b'z');

            if b < a {
                let mid = b + (a - b) / 2;
                if mid > b {
                    result.push(mid);
                    return Self(String::from_utf8(result).unwrap_or_else(|_| before.0.clone()));
                } else {
                    // No room at this position; keep the prefix and go deeper
                    result.push(b);
                }
            } else {
                result.push(b);
            }
        }

        // No midpoint found at any shared position; descend one level
        result.push(b'V');
        Self(String::from_utf8(result).unwrap_or_else(|_| format!("{}V", before.0)))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialOrd for Ordinal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ordinal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Default for Ordinal {
    fn default() -> Self {
        Self::first()
    }
}
