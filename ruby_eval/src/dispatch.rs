//! The dispatch engine: the single entry point tying the inline cache and method registry
//! together (§4.5).

use rustc_hash::FxHashMap;
use ruby_values::{RubyResult, SharedMutableRegistry, SharedRegistry, Value};
use tracing::{debug, trace};

use crate::inline_cache::{IcQuery, IcStateKind, InlineCache};
use crate::registry::MethodRegistry;
use crate::stack::ensure_sufficient_stack;

/// Ties one process-wide [`MethodRegistry`] to a table of per-call-site [`InlineCache`]s.
///
/// The registry is wrapped in `SharedMutableRegistry` (single-writer-lock, per §5); the IC table
/// is wrapped the same way so a host embedding the evaluator on a worker thread can still confine
/// or guard it, though in the normal single-threaded evaluator loop no contention occurs.
#[derive(Clone)]
pub struct DispatchEngine {
    registry: SharedMutableRegistry<MethodRegistry>,
    caches: SharedMutableRegistry<FxHashMap<u64, InlineCache>>,
}

impl DispatchEngine {
    pub fn new(registry: MethodRegistry) -> Self {
        DispatchEngine {
            registry: SharedMutableRegistry::new(registry),
            caches: SharedMutableRegistry::new(FxHashMap::default()),
        }
    }

    pub fn registry(&self) -> SharedMutableRegistry<MethodRegistry> {
        self.registry.clone()
    }

    /// `dispatch(site-id, receiver, method-name, args…) -> value` (§4.5's five-step algorithm),
    /// extended with the lazy invalidation check from §9's Open Classes design note: a cache hit
    /// whose recorded generation no longer matches the registry's current generation for
    /// `(class, method)` is treated as stale and re-resolved, refreshing the entry in place.
    pub fn dispatch(
        &self,
        site_id: u64,
        receiver: &Value,
        method_name: &'static str,
        args: &[Value],
    ) -> RubyResult<Value> {
        ensure_sufficient_stack(|| self.dispatch_inner(site_id, receiver, method_name, args))
    }

    fn dispatch_inner(
        &self,
        site_id: u64,
        receiver: &Value,
        method_name: &'static str,
        args: &[Value],
    ) -> RubyResult<Value> {
        let class_name = receiver.class_name();
        let mut caches = self.caches.write();
        let ic = caches
            .entry(site_id)
            .or_insert_with(|| InlineCache::new(site_id, method_name));

        match ic.query(class_name) {
            IcQuery::Hit { imp, generation } => {
                let current = self.registry.read().current_generation(class_name, method_name);
                if current == Some(generation) {
                    ic.record_hit();
                    trace!(site_id, class_name, method_name, "inline cache hit");
                    drop(caches);
                    return imp.call(receiver, args);
                }
                // Stale: registry was updated since this entry was filled (open-class
                // redefinition). Re-resolve and refresh in place without changing cache shape.
                let before = ic.state_kind();
                let registry = self.registry.read();
                let (fresh_imp, fresh_generation) = registry
                    .lookup(receiver, method_name)
                    .ok_or_else(|| ruby_values::no_method_error(class_name, method_name, args.len()))?;
                drop(registry);
                ic.refresh(class_name, fresh_imp.clone(), fresh_generation);
                ic.record_miss();
                debug!(site_id, class_name, method_name, ?before, "inline cache entry invalidated");
                drop(caches);
                fresh_imp.call(receiver, args)
            }
            IcQuery::Miss => {
                let registry = self.registry.read();
                let resolved = registry.lookup(receiver, method_name);
                drop(registry);
                let (imp, generation) = resolved
                    .ok_or_else(|| ruby_values::no_method_error(class_name, method_name, args.len()))?;
                let before = ic.state_kind();
                ic.update(class_name, imp.clone(), generation);
                ic.record_miss();
                let after = ic.state_kind();
                if after != before {
                    debug!(site_id, method_name, ?before, ?after, "inline cache state transition");
                }
                drop(caches);
                imp.call(receiver, args)
            }
        }
    }

    /// Observability snapshot for a call-site's cache, if one has been created.
    pub fn stats_for(&self, site_id: u64) -> Option<(IcStateKind, u64, u64)> {
        let caches = self.caches.read();
        caches.get(&site_id).map(|ic| (ic.state_kind(), ic.hits(), ic.misses()))
    }

    pub fn debug_line_for(&self, site_id: u64) -> Option<String> {
        self.caches.read().get(&site_id).map(InlineCache::debug_line)
    }
}

/// An immutable snapshot handle for read-only consumers that should not be able to register new
/// methods (e.g. the spec harness), wrapping the dispatch engine's registry view.
pub type ReadOnlyRegistry = SharedRegistry<MethodRegistry>;
