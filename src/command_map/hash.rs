use super::CommandMap;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// A command map backed by a single hashmap
///
/// If the `qp-trie` feature isn't enabled, this is the default. Later entries with the same key
/// replace earlier ones.
///
/// # Example
/// ```
/// use texmath_parser::command_map::HashCommandMap;
/// use texmath_parser::LATEX_COMMANDS;
///
/// let commands = HashCommandMap::from_iter(LATEX_COMMANDS);
/// ```
#[derive(Debug, Clone)]
pub struct HashCommandMap<K, V, S = RandomState>(HashMap<K, V, S>);

impl<K, V, S> HashCommandMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher + Default,
{
    /// Create from an iterator and custom hasher
    pub fn from_iter_hasher<T, I>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
        I: Iterator<Item = (K, V)>,
    {
        let mut map = HashMap::default();
        map.extend(iter.into_iter());
        HashCommandMap(map)
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

impl<K, V> FromIterator<(K, V)> for HashCommandMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_iter_hasher(iter)
    }
}

impl<K, V, S> CommandMap<V> for HashCommandMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn get_command<N: AsRef<str>>(&self, name: N) -> Option<&V> {
        self.0.get(name.as_ref())
    }
}
