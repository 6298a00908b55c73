use super::CommandMap;
use qp_trie::Trie;
use std::borrow::Borrow;

#[derive(Debug, PartialEq, Eq, Clone)]
struct Wrapper<K>(K);

impl<K> Borrow<[u8]> for Wrapper<K>
where
    K: Borrow<str>,
{
    fn borrow(&self) -> &[u8] {
        self.0.borrow().as_bytes()
    }
}

/// A command map backed by a qp-trie
///
/// This is the default command map and requires the `qp-trie` feature (enabled by default).
///
/// # Example
/// ```
/// use texmath_parser::command_map::QpTrieCommandMap;
/// use texmath_parser::LATEX_COMMANDS;
///
/// let commands = QpTrieCommandMap::from_iter(LATEX_COMMANDS);
/// ```
#[derive(Debug, Clone)]
pub struct QpTrieCommandMap<K: Clone, V>(Trie<Wrapper<K>, V>);

impl<K, V> FromIterator<(K, V)> for QpTrieCommandMap<K, V>
where
    K: Borrow<str> + Clone,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        QpTrieCommandMap(
            iter.into_iter()
                .map(|(key, val)| (Wrapper(key), val))
                .collect(),
        )
    }
}

impl<K, V> CommandMap<V> for QpTrieCommandMap<K, V>
where
    K: Borrow<str> + Clone,
{
    fn get_command<N: AsRef<str>>(&self, name: N) -> Option<&V> {
        self.0.get(name.as_ref().as_bytes())
    }
}
