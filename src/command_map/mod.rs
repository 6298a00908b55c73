//! CommandMaps are string keyed maps from command text to what the command means
//!
//! The parser looks up every `\command` and bare operator token in one of these maps to decide
//! whether it names a binary operator, a unary command, or nothing at all. The default table is
//! [`LATEX_COMMANDS`][crate::LATEX_COMMANDS], but any map implementing [`CommandMap`] can be
//! handed to [`Parser::with_commands`][crate::Parser::with_commands].
//!
//! Lookups are exact: `\cdot` matches, `\cdo` and `\cdots` don't.
//!
//! # Example
//!
//! ```
//! use texmath_parser::command_map::LinearCommandMap;
//! use texmath_parser::{lex, Parser, LATEX_COMMANDS};
//!
//! let commands = LinearCommandMap::from_vec(LATEX_COMMANDS);
//! let tokens = lex("x+y");
//! let parsed = Parser::with_commands(&commands).parse_complete(&tokens);
//! assert!(parsed.is_ok());
//! ```

mod hash;
mod linear;
#[cfg(feature = "qp-trie")]
mod trie;

#[cfg(feature = "fnv")]
use ::fnv::FnvBuildHasher;
pub use hash::HashCommandMap;
pub use linear::LinearCommandMap;
#[cfg(feature = "qp-trie")]
pub use trie::QpTrieCommandMap;

/// A hash command map using the fnv hasher
///
/// This requires the `fnv` feature.
///
/// # Example
/// ```
/// use texmath_parser::command_map::FnvHashCommandMap;
/// use texmath_parser::LATEX_COMMANDS;
///
/// let commands = FnvHashCommandMap::from_iter_hasher(LATEX_COMMANDS);
/// ```
#[cfg(feature = "fnv")]
pub type FnvHashCommandMap<K, V> = HashCommandMap<K, V, FnvBuildHasher>;

/// A CommandMap resolves the full text of a command token
pub trait CommandMap<V> {
    /// Get the value registered for exactly `name`
    ///
    /// # Example
    /// ```
    /// use texmath_parser::command_map::{CommandMap, HashCommandMap};
    ///
    /// let map = HashCommandMap::from_iter([("\\cdot", 1), ("\\frac", 2)]);
    /// assert_eq!(map.get_command("\\frac"), Some(&2));
    /// assert_eq!(map.get_command("\\fra"), None);
    /// ```
    fn get_command<N: AsRef<str>>(&self, name: N) -> Option<&V>;
}
