//! The per-call-site inline cache state machine (§4.4).

use smallvec::SmallVec;

use crate::method_impl::MethodImpl;

/// Polymorphic caches hold at most this many distinct receiver classes before megamorphosing
/// (§9: "a small fixed-capacity inline array (<=4) to avoid heap allocation on the hot path").
pub const MAX_POLYMORPHIC_ENTRIES: usize = 4;

#[derive(Clone)]
struct Entry {
    class_name: &'static str,
    imp: MethodImpl,
    generation: u64,
}

/// The IC state (§3's Inline Cache Entry). Transitions are monotone: Empty -> Monomorphic ->
/// Polymorphic -> Megamorphic; invalidation refreshes an entry's `imp`/`generation` in place
/// without changing which of these four shapes the cache is in, so it never "downgrades" the
/// state type.
enum IcState {
    Empty,
    Monomorphic(Entry),
    Polymorphic(SmallVec<[Entry; MAX_POLYMORPHIC_ENTRIES]>),
    Megamorphic,
}

/// The outcome of querying the cache for a class name.
pub enum IcQuery {
    Miss,
    /// A cache entry exists for this class; its recorded generation may or may not still match
    /// the registry's current generation for `(class, method)` — the caller checks that.
    Hit { imp: MethodImpl, generation: u64 },
}

/// A coarse classification of the cache's current shape, for observability (§4.4) and for the
/// monotonicity property test (§8 invariant 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IcStateKind {
    Empty,
    Monomorphic,
    Polymorphic,
    Megamorphic,
}

pub struct InlineCache {
    site_id: u64,
    method_name: &'static str,
    state: IcState,
    hits: u64,
    misses: u64,
}

impl InlineCache {
    pub fn new(site_id: u64, method_name: &'static str) -> Self {
        InlineCache {
            site_id,
            method_name,
            state: IcState::Empty,
            hits: 0,
            misses: 0,
        }
    }

    pub fn state_kind(&self) -> IcStateKind {
        match self.state {
            IcState::Empty => IcStateKind::Empty,
            IcState::Monomorphic(_) => IcStateKind::Monomorphic,
            IcState::Polymorphic(_) => IcStateKind::Polymorphic,
            IcState::Megamorphic => IcStateKind::Megamorphic,
        }
    }

    /// `ic.lookup(class-name) -> (hit, impl)`.
    pub fn query(&self, class_name: &str) -> IcQuery {
        match &self.state {
            IcState::Empty => IcQuery::Miss,
            IcState::Monomorphic(entry) if entry.class_name == class_name => IcQuery::Hit {
                imp: entry.imp.clone(),
                generation: entry.generation,
            },
            IcState::Monomorphic(_) => IcQuery::Miss,
            IcState::Polymorphic(entries) => entries
                .iter()
                .find(|e| e.class_name == class_name)
                .map_or(IcQuery::Miss, |entry| IcQuery::Hit {
                    imp: entry.imp.clone(),
                    generation: entry.generation,
                }),
            IcState::Megamorphic => IcQuery::Miss,
        }
    }

    /// `ic.update(class-name, impl) -> new-state` after a miss, per §4.4's transition table.
    pub fn update(&mut self, class_name: &'static str, imp: MethodImpl, generation: u64) {
        let new_entry = Entry {
            class_name,
            imp,
            generation,
        };
        self.state = match std::mem::replace(&mut self.state, IcState::Empty) {
            IcState::Empty => IcState::Monomorphic(new_entry),
            IcState::Monomorphic(old) if old.class_name == class_name => IcState::Monomorphic(old),
            IcState::Monomorphic(old) => {
                let mut entries = SmallVec::new();
                entries.push(old);
                entries.push(new_entry);
                IcState::Polymorphic(entries)
            }
            IcState::Polymorphic(entries) if entries.iter().any(|e| e.class_name == class_name) => {
                IcState::Polymorphic(entries)
            }
            IcState::Polymorphic(mut entries) => {
                if entries.len() + 1 >= MAX_POLYMORPHIC_ENTRIES {
                    IcState::Megamorphic
                } else {
                    entries.push(new_entry);
                    IcState::Polymorphic(entries)
                }
            }
            IcState::Megamorphic => IcState::Megamorphic,
        };
    }

    /// Overwrite a stale entry's `imp`/`generation` for `class_name` in place, without altering
    /// the cache's coarse shape. Used when the registry's generation for `(class, method)` has
    /// advanced past what this entry was filled with (open-class redefinition).
    pub fn refresh(&mut self, class_name: &str, imp: MethodImpl, generation: u64) {
        match &mut self.state {
            IcState::Monomorphic(entry) if entry.class_name == class_name => {
                entry.imp = imp;
                entry.generation = generation;
            }
            IcState::Polymorphic(entries) => {
                if let Some(entry) = entries.iter_mut().find(|e| e.class_name == class_name) {
                    entry.imp = imp;
                    entry.generation = generation;
                }
            }
            _ => {}
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            #[expect(
                clippy::cast_precision_loss,
                reason = "hit-rate reporting; precision loss above 2^53 hits is not a concern"
            )]
            let rate = self.hits as f64 / total as f64;
            rate
        }
    }

    /// `stats() -> {type, hits, misses, hit-rate, entries|class}` (§4.4's observability
    /// contract).
    pub fn stats(&self) -> IcStats {
        let (kind, entries) = match &self.state {
            IcState::Empty => ("empty", Vec::new()),
            IcState::Monomorphic(e) => ("monomorphic", vec![e.class_name]),
            IcState::Polymorphic(entries) => (
                "polymorphic",
                entries.iter().map(|e| e.class_name).collect(),
            ),
            IcState::Megamorphic => ("megamorphic", Vec::new()),
        };
        IcStats {
            kind,
            hits: self.hits,
            misses: self.misses,
            hit_rate: self.hit_rate(),
            entries,
        }
    }

    /// `"IC [site] method=… state=… hits=…/… (rate%) | cached: …"`.
    pub fn debug_line(&self) -> String {
        let stats = self.stats();
        format!(
            "IC [{}] method={} state={} hits={}/{} ({:.1}%) | cached: {}",
            self.site_id,
            self.method_name,
            stats.kind,
            stats.hits,
            stats.hits + stats.misses,
            stats.hit_rate * 100.0,
            stats.entries.join(", ")
        )
    }
}

pub struct IcStats {
    pub kind: &'static str,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn noop(_: &ruby_values::Value, _: &[ruby_values::Value]) -> ruby_values::RubyResult<ruby_values::Value> {
        Ok(ruby_values::Value::Nil)
    }

    #[test]
    fn s1_three_calls_same_class_end_monomorphic_with_two_hits_one_miss() {
        let mut ic = InlineCache::new(0, "+");
        for _ in 0..3 {
            match ic.query("Integer") {
                IcQuery::Hit { .. } => ic.record_hit(),
                IcQuery::Miss => {
                    ic.update("Integer", MethodImpl::builtin(noop), 1);
                    ic.record_miss();
                }
            }
        }
        assert_eq!(ic.state_kind(), IcStateKind::Monomorphic);
        assert_eq!(ic.hits(), 2);
        assert_eq!(ic.misses(), 1);
    }

    #[test]
    fn s2_four_distinct_classes_reach_megamorphic_on_the_fourth() {
        let mut ic = InlineCache::new(0, "each");
        let classes = ["Integer", "String", "Integer", "Array"];
        let mut states = Vec::new();
        for class in classes {
            if let IcQuery::Miss = ic.query(class) {
                ic.update(class, MethodImpl::builtin(noop), 1);
            }
            states.push(ic.state_kind());
        }
        assert_eq!(
            states,
            vec![
                IcStateKind::Monomorphic,
                IcStateKind::Polymorphic,
                IcStateKind::Polymorphic,
                IcStateKind::Megamorphic,
            ]
        );
    }

    #[test]
    fn state_sequence_is_monotone() {
        let mut ic = InlineCache::new(0, "foo");
        let mut last = IcStateKind::Empty;
        for class in ["A", "B", "C", "D", "E"] {
            if let IcQuery::Miss = ic.query(class) {
                ic.update(class, MethodImpl::builtin(noop), 1);
            }
            let current = ic.state_kind();
            assert!(current >= last, "state regressed from {last:?} to {current:?}");
            last = current;
        }
    }

    #[test]
    fn hits_plus_misses_equals_dispatch_count() {
        let mut ic = InlineCache::new(0, "foo");
        let mut dispatch_count = 0;
        for class in ["A", "A", "B", "A"] {
            dispatch_count += 1;
            match ic.query(class) {
                IcQuery::Hit { .. } => ic.record_hit(),
                IcQuery::Miss => {
                    ic.update(class, MethodImpl::builtin(noop), 1);
                    ic.record_miss();
                }
            }
        }
        assert_eq!(ic.hits() + ic.misses(), dispatch_count);
    }

    #[test]
    fn refresh_updates_impl_without_changing_state_shape() {
        let mut ic = InlineCache::new(0, "foo");
        ic.update("Integer", MethodImpl::builtin(noop), 1);
        assert_eq!(ic.state_kind(), IcStateKind::Monomorphic);
        ic.refresh("Integer", MethodImpl::builtin(noop), 2);
        assert_eq!(ic.state_kind(), IcStateKind::Monomorphic);
    }
}
