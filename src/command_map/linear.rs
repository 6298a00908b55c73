use super::CommandMap;
use std::borrow::Borrow;
use std::mem;

/// A very simple command map
///
/// Entries are kept in a sorted slice and found with a binary search. The whole LaTeX command
/// table is only a handful of entries, so this is a reasonable choice when pulling in a hasher or
/// trie isn't worth it. Like the other maps, later entries with the same key win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCommandMap<K, V>(Box<[(K, V)]>);

impl<K, V> LinearCommandMap<K, V>
where
    K: Borrow<str> + Eq,
{
    /// Create from a vector of entries
    pub fn from_vec<B>(inp: B) -> Self
    where
        B: Into<Vec<(K, V)>>,
    {
        let mut res = inp.into();
        // stable, so equal keys stay in insertion order
        res.sort_by(|(left, _), (right, _)| {
            left.borrow().as_bytes().cmp(right.borrow().as_bytes())
        });
        res.dedup_by(|later, kept| {
            if later.0 == kept.0 {
                mem::swap(later, kept);
                true
            } else {
                false
            }
        });
        LinearCommandMap(res.into())
    }

    /// The number of distinct commands
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no commands are registered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LinearCommandMap<K, V>
where
    K: Borrow<str> + Eq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_vec(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<K: Borrow<str>, V> CommandMap<V> for LinearCommandMap<K, V> {
    fn get_command<N: AsRef<str>>(&self, name: N) -> Option<&V> {
        let name = name.as_ref().as_bytes();
        self.0
            .binary_search_by(|(key, _)| key.borrow().as_bytes().cmp(name))
            .ok()
            .map(|ind| &self.0[ind].1)
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandMap, LinearCommandMap};

    #[test]
    fn exact_lookup() {
        let map =
            LinearCommandMap::from_vec([("\\frac", 2), ("+", 0), ("\\cdot", 1), ("\\frac", 3)]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_command("\\cdot"), Some(&1));
        assert_eq!(map.get_command("\\frac"), Some(&3));
        assert_eq!(map.get_command("+"), Some(&0));
        assert_eq!(map.get_command("\\cdots"), None);
        assert_eq!(map.get_command("💖"), None);
    }

    #[test]
    fn later_duplicates_win() {
        let map = LinearCommandMap::from_vec([("a", 0), ("a", 1), ("a", 2), ("b", 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_command("a"), Some(&2));
        assert_eq!(map.get_command("b"), Some(&3));
    }
}
