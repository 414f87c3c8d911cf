//! Provenance list of the modules that depend on an inventory entry.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of requesting module names.
///
/// Names are kept in ascending lexicographic order at all times, so the
/// serialized `x-usedBy` array is stable across runs and diffs cleanly.
/// Deserialization normalizes whatever order the input had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UsedBy(Vec<String>);

impl UsedBy {
    /// Create an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a list holding a single module name
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Insert a name at its sorted position.
    ///
    /// Returns `false` when the name was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.0.binary_search(&name) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, name);
                true
            }
        }
    }

    /// Check whether a module name is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .is_ok()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for UsedBy {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<UsedBy> for Vec<String> {
    fn from(used_by: UsedBy) -> Self {
        used_by.0
    }
}

impl FromIterator<String> for UsedBy {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut names: Vec<String> = iter.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        Self(names)
    }
}

impl<'a> IntoIterator for &'a UsedBy {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut used_by = UsedBy::new();
        assert!(used_by.insert("zeta"));
        assert!(used_by.insert("alpha"));
        assert!(used_by.insert("mid"));
        assert_eq!(used_by.as_slice(), ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut used_by = UsedBy::single("root");
        assert!(!used_by.insert("root"));
        assert_eq!(used_by.len(), 1);
    }

    #[test]
    fn test_ordering_is_byte_wise() {
        let used_by: UsedBy = vec!["b".to_string(), "B".to_string(), "a".to_string()].into();
        assert_eq!(used_by.as_slice(), ["B", "a", "b"]);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let used_by: UsedBy = serde_json::from_str(r#"["lib", "app", "lib"]"#).unwrap();
        assert_eq!(used_by.as_slice(), ["app", "lib"]);
        assert!(used_by.contains("app"));
        assert!(!used_by.contains("other"));
    }

    #[test]
    fn test_serialize_as_array() {
        let used_by: UsedBy = vec!["b".to_string(), "a".to_string()].into();
        assert_eq!(serde_json::to_string(&used_by).unwrap(), r#"["a","b"]"#);
    }
}
