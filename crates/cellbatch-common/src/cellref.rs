//! Normalized cell identifiers.
//!
//! Submissions may spell the same cell many ways (`"a1"`, `" A1 "`,
//! `"$A$1"`). Batch membership, dependency edges, and the pass cache all key
//! on the normalized form, so normalization happens once at the boundary and
//! everything downstream compares `CellRef`s directly.

use std::fmt;

/// A cell reference normalized for identity: surrounding whitespace trimmed,
/// positional-lock markers (`$`) stripped, letters uppercased.
///
/// Normalization is idempotent: `normalize(normalize(x)) == normalize(x)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef(String);

impl CellRef {
    pub fn normalize(raw: &str) -> Self {
        let mut out = String::with_capacity(raw.len());
        for ch in raw.trim().chars() {
            if ch == '$' {
                continue;
            }
            out.extend(ch.to_uppercase());
        }
        CellRef(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for references that normalized away to nothing (e.g. `"$ "`),
    /// which the gate rejects and the graph builder skips.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellRef {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}
