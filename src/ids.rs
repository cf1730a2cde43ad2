//! Identifier generation for pages, blocks and tags.
//!
//! The document model never invents ids on its own. Whatever builds entities
//! (the decoder, the edit coordinator) is handed an [`IdGenerator`], so tests
//! can use predictable ids while the application uses random UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Source of process-unique identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> Id;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> Id {
        Id(uuid::Uuid::new_v4().to_string())
    }
}

/// Counter-based ids (`prefix-1`, `prefix-2`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Id {
        let id = Id(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> Id {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> Id {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sequential_ids_count_up_from_one() {
        let mut ids = SequentialIds::new("t");
        assert_eq!(ids.next_id(), Id::new("t-1"));
        assert_eq!(ids.next_id(), Id::new("t-2"));
    }

    #[test]
    fn test_uuid_ids_do_not_repeat() {
        let mut ids = UuidIds;
        let seen: HashSet<Id> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&Id::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
