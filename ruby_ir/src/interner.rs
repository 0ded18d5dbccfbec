//! Sharded string interner backing [`Name`].
//!
//! Shards reduce lock contention: each string hashes to one of 16 shards, each guarded by its
//! own `RwLock`, so interning two unrelated names rarely contends.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error returned when a shard has interned more strings than a `Name` can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternError {
    pub shard_idx: usize,
    pub count: usize,
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interner shard {} overflowed at {} entries",
            self.shard_idx, self.count
        )
    }
}

impl std::error::Error for InternError {}

struct InternShard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl InternShard {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn with_empty() -> Self {
        let mut shard = Self::new();
        shard.strings.push("");
        shard.map.insert("", 0);
        shard
    }
}

/// Sharded, append-only string interner producing [`Name`] handles.
pub struct StringInterner {
    shards: [RwLock<InternShard>; Name::NUM_SHARDS],
    total_count: AtomicUsize,
}

impl StringInterner {
    /// Create a new interner with the Ruby core class names pre-interned.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(InternShard::with_empty())
            } else {
                RwLock::new(InternShard::new())
            }
        });

        let interner = Self {
            shards,
            total_count: AtomicUsize::new(1),
        };
        interner.pre_intern_core_names();
        interner
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern a string, returning its `Name`, or an error if the shard overflows.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s) {
                return Ok(Name::new(shard_idx_u32, local));
            }
        }

        let mut guard = shard.write();
        if let Some(&local) = guard.map.get(s) {
            return Ok(Name::new(shard_idx_u32, local));
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let local = u32::try_from(guard.strings.len()).map_err(|_| InternError {
            shard_idx,
            count: guard.strings.len(),
        })?;
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Name::new(shard_idx_u32, local))
    }

    /// Intern a string, panicking on the (practically unreachable) shard-overflow case.
    ///
    /// # Panics
    /// Panics if a shard exceeds 2^28 distinct strings.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a `Name`.
    pub fn lookup(&self, name: Name) -> &'static str {
        let shard = &self.shards[name.shard()];
        let guard = shard.read();
        guard.strings[name.local()]
    }

    /// Total number of distinct interned strings across all shards.
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pre_intern_core_names(&self) {
        const CORE_NAMES: &[&str] = &[
            "NilClass", "TrueClass", "FalseClass", "Integer", "Float", "String", "Symbol",
            "Array", "Hash", "Range", "Rational", "Object", "BasicObject", "Kernel", "Comparable",
            "class", "ancestors", "respond_to?", "to_s", "inspect", "==", "<=>", "nil?",
            "object_id", "equal?", "kind_of?", "is_a?", "instance_of?", "+", "-", "*", "/", "%",
            "-@", "+@",
        ];
        for name in CORE_NAMES {
            self.intern(name);
        }
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide interner. Built-in class and method names, and any identifier interned by
/// user code (`class` definitions, symbols), all go through this single instance so that `Name`
/// equality is a plain integer comparison everywhere in the eval core.
pub fn global() -> &'static StringInterner {
    static GLOBAL: std::sync::OnceLock<StringInterner> = std::sync::OnceLock::new();
    GLOBAL.get_or_init(StringInterner::new)
}

/// Intern `s` in the process-wide interner.
pub fn intern(s: &str) -> Name {
    global().intern(s)
}

/// Look up the string for a `Name` interned in the process-wide interner.
pub fn resolve(name: Name) -> &'static str {
    global().lookup(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn interning_the_same_string_twice_returns_the_same_name() {
        let interner = StringInterner::new();
        let a = interner.intern("frobnicate");
        let b = interner.intern("frobnicate");
        assert_eq!(a, b);
    }

    #[test]
    fn interning_distinct_strings_returns_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_round_trips_through_intern() {
        let interner = StringInterner::new();
        let name = interner.intern("each");
        assert_eq!(interner.lookup(name), "each");
    }

    #[test]
    fn core_class_names_are_pre_interned() {
        let interner = StringInterner::new();
        let before = interner.len();
        let _ = interner.intern("Integer");
        assert_eq!(interner.len(), before, "Integer should already be interned");
    }
}
