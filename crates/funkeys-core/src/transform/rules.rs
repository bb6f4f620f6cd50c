// Funkeys Substitution Rules
// Fixed key-for-key swaps applied to every key event

use indexmap::IndexMap;

use crate::Key;

/// Static one-to-one key substitutions.
///
/// Insertion order is kept so the table logs the same way every run.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    mappings: IndexMap<Key, Key>,
}

impl SubstitutionTable {
    /// The funkeys rule set.
    ///
    /// Enter maps to the modifier it stands in for while held; the tap
    /// rewrite back to Enter is the translator's job, not the table's.
    pub fn funkeys() -> Self {
        let mut mappings = IndexMap::with_capacity(4);
        mappings.insert(Key::CAPSLOCK, Key::LEFT_CTRL);
        mappings.insert(Key::LEFT_CTRL, Key::CAPSLOCK);
        mappings.insert(Key::RIGHT_CTRL, Key::ENTER);
        mappings.insert(Key::ENTER, Key::RIGHT_CTRL);
        Self { mappings }
    }

    /// Output code for `key`; unmapped keys are returned unchanged
    pub fn apply(&self, key: Key) -> Key {
        self.get(key).unwrap_or(key)
    }

    /// Get the remapped key for a given key
    pub fn get(&self, key: Key) -> Option<Key> {
        self.mappings.get(&key).copied()
    }

    /// Check if a key is remapped
    pub fn contains(&self, key: Key) -> bool {
        self.mappings.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, Key)> + '_ {
        self.mappings.iter().map(|(from, to)| (*from, *to))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::funkeys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_capslock_swap() {
        let table = SubstitutionTable::funkeys();
        assert_eq!(table.apply(Key::CAPSLOCK), Key::LEFT_CTRL);
        assert_eq!(table.apply(Key::LEFT_CTRL), Key::CAPSLOCK);
    }

    #[test]
    fn test_right_ctrl_becomes_enter() {
        let table = SubstitutionTable::funkeys();
        assert_eq!(table.apply(Key::RIGHT_CTRL), Key::ENTER);
        assert_eq!(table.apply(Key::ENTER), Key::RIGHT_CTRL);
    }

    #[test]
    fn test_unmapped_keys_pass_through() {
        let table = SubstitutionTable::funkeys();
        for code in [Key::A.code(), Key::ESC.code(), Key::KPENTER.code(), 0, 0x2ff] {
            let key = Key::from(code);
            assert!(!table.contains(key));
            assert_eq!(table.apply(key), key);
        }
    }

    #[test]
    fn test_table_order_is_stable() {
        let table = SubstitutionTable::default();
        let sources: Vec<Key> = table.iter().map(|(from, _)| from).collect();
        assert_eq!(
            sources,
            vec![Key::CAPSLOCK, Key::LEFT_CTRL, Key::RIGHT_CTRL, Key::ENTER]
        );
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
    }
}
