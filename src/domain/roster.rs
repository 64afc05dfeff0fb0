use std::collections::HashMap;

use super::identity::normalize_competitor_id;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClubRef {
    pub id: i64,
    pub name: String,
}

/// Registered competitor as known to the roster store
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub club: Option<ClubRef>,
}

/// Snapshot of the roster keyed by normalized competitor id.
/// Loaded once per run and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    entries: HashMap<String, RosterEntry>,
}

impl RosterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, competitor_id: &str, entry: RosterEntry) {
        self.entries.insert(normalize_competitor_id(competitor_id), entry);
    }

    pub fn lookup(&self, competitor_id: &str) -> Option<&RosterEntry> {
        self.entries.get(&normalize_competitor_id(competitor_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, RosterEntry)> for RosterIndex {
    fn from_iter<I: IntoIterator<Item = (String, RosterEntry)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (competitor_id, entry) in iter {
            index.insert(&competitor_id, entry);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_normalized() {
        let mut index = RosterIndex::new();
        index.insert(
            "ab c",
            RosterEntry {
                name: "Alice".to_string(),
                club: None,
            },
        );

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("ABC").map(|e| e.name.as_str()), Some("Alice"));
        assert_eq!(index.lookup(" a b c ").map(|e| e.name.as_str()), Some("Alice"));
        assert!(index.lookup("abd").is_none());
    }
}
