//! Element identifiers backed by a process-wide string interner
//!
//! Fragment identifiers (`href="#id"`) are compared on every reference
//! lookup, so they are interned once and compared as symbols afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned element identifier
///
/// # Examples
///
/// ```
/// use layertree_core::identifier::Id;
///
/// let glyph = Id::new("glyph-a");
/// assert_eq!(glyph, Id::new("glyph-a"));
/// assert_eq!(glyph, "glyph-a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the `Id` for `name` only if it has been interned before.
    ///
    /// Lookups use this so that probing for an unknown fragment does not grow
    /// the interner.
    ///
    /// # Examples
    ///
    /// ```
    /// use layertree_core::identifier::Id;
    ///
    /// let known = Id::new("known-id");
    /// assert_eq!(Id::existing("known-id"), Some(known));
    /// assert_eq!(Id::existing("never-interned-id"), None);
    /// ```
    pub fn existing(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("path-1");
        let id2 = Id::new("path-1");
        let id3 = Id::new("path-2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "path-1");
    }

    #[test]
    fn test_existing_does_not_intern() {
        assert_eq!(Id::existing("identifier-test-missing"), None);
        // Still missing: `existing` must not have interned it.
        assert_eq!(Id::existing("identifier-test-missing"), None);

        let id = Id::new("identifier-test-present");
        assert_eq!(Id::existing("identifier-test-present"), Some(id));
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "test_string".into();
        let id2 = Id::new("test_string");

        assert_eq!(id1, id2);
        assert_eq!(id1, "test_string");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("MJX-1-TEX-N-31");

        assert!(id == "MJX-1-TEX-N-31");
        assert!(id != "MJX-1-TEX-N-32");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");
    }
}
