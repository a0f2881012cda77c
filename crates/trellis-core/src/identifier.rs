//! Node identifiers backed by a global string interner.
//!
//! Graph nodes are keyed by [`Id`]. Identifiers may be created from strings or
//! from integers; an integer key is interned as its decimal representation, so
//! `Id::from(7)` and `Id::new("7")` name the same node.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Interned node identifier.
///
/// `Id` is `Copy` and compares in constant time, which keeps the hot loops
/// of the layout engine free of string comparisons.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let by_name = Id::new("router");
/// let by_number = Id::from(42);
///
/// assert_eq!(by_name, "router");
/// assert_eq!(by_number, Id::new("42"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its textual key.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an `Id` from a numeric key.
    ///
    /// The number is interned as its decimal string, mirroring how mixed
    /// string/number keys address the same node.
    pub fn from_number(number: i64) -> Self {
        Self::new(&number.to_string())
    }

    /// Returns the textual key of this identifier.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .unwrap_or_default()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<i64> for Id {
    fn from(number: i64) -> Self {
        Self::from_number(number)
    }
}

impl From<i32> for Id {
    fn from(number: i32) -> Self {
        Self::from_number(i64::from(number))
    }
}

impl From<u32> for Id {
    fn from(number: u32) -> Self {
        Self::from_number(i64::from(number))
    }
}

impl From<usize> for Id {
    fn from(number: usize) -> Self {
        Self::new(&number.to_string())
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("alpha");
        let id2 = Id::new("alpha");
        let id3 = Id::new("beta");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "alpha");
    }

    #[test]
    fn test_numeric_keys_share_the_string_namespace() {
        assert_eq!(Id::from(1), Id::new("1"));
        assert_eq!(Id::from(1usize), Id::from(1i64));
        assert_eq!(Id::from(-3), "-3");
        assert_ne!(Id::from(1), Id::from(10));
    }

    #[test]
    fn test_display_and_as_string() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
        assert_eq!(id.as_string(), "display_test");
    }

    #[test]
    fn test_from_str() {
        let parsed: Id = "parsed".parse().unwrap();
        assert_eq!(parsed, Id::new("parsed"));
    }

    #[test]
    fn test_hash_and_eq() {
        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("node");
        assert!(id == "node");
        assert!(id != "other");

        let empty = Id::new("");
        assert!(empty == "");
    }
}
