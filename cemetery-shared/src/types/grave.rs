use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::GraveId;

/// A grave with a position and a capacity. It holds zero or more bodies up
/// to its capacity.
///
/// Equality follows the same identity rule as [`crate::types::Body`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grave {
    pub id: Option<GraveId>,
    pub column: i32,
    pub row: i32,
    pub capacity: i32,
    pub note: Option<String>,
}

impl Grave {
    /// Creates an unpersisted grave.
    pub fn new(column: i32, row: i32, capacity: i32) -> Self {
        Self {
            id: None,
            column,
            row,
            capacity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Compares every attribute, including the id.
    pub fn same_fields_as(&self, other: &Grave) -> bool {
        self.id == other.id
            && self.column == other.column
            && self.row == other.row
            && self.capacity == other.capacity
            && self.note == other.note
    }
}

impl PartialEq for Grave {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Grave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Grave{{id={}}}", id),
            None => write!(f, "Grave{{id=null}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grave_identity_equality() {
        let mut a = Grave::new(1, 2, 3);
        let mut b = Grave::new(4, 5, 6).with_note("other");
        assert_ne!(a, b);
        a.id = Some(1);
        b.id = Some(1);
        assert_eq!(a, b);
        b.id = Some(2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_fields_as_compares_note() {
        let a = Grave::new(1, 2, 3).with_note("north");
        let b = Grave::new(1, 2, 3);
        assert!(!a.same_fields_as(&b));
        assert!(a.same_fields_as(&a.clone()));
    }
}
