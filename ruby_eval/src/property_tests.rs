//! Property tests for §8's IC invariants, run over arbitrary class-name sequences.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::inline_cache::{IcQuery, IcStateKind, InlineCache};
    use crate::method_impl::MethodImpl;
    use ruby_values::{RubyResult, Value};

    fn noop(_: &Value, _: &[Value]) -> RubyResult<Value> {
        Ok(Value::Nil)
    }

    fn class_pool() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("Integer"),
            Just("Float"),
            Just("String"),
            Just("Array"),
            Just("Hash"),
            Just("Range"),
        ]
    }

    proptest! {
        /// Invariant 2: the observed sequence of state-kinds is monotone.
        #[test]
        fn ic_state_sequence_is_always_monotone(classes in prop::collection::vec(class_pool(), 0..30)) {
            let mut ic = InlineCache::new(0, "foo");
            let mut last = IcStateKind::Empty;
            for class in classes {
                if let IcQuery::Miss = ic.query(class) {
                    ic.update(class, MethodImpl::builtin(noop), 1);
                }
                let current = ic.state_kind();
                prop_assert!(current >= last);
                last = current;
            }
        }

        /// Invariant 3: after >= 4 distinct classes at one site, the IC is Megamorphic.
        #[test]
        fn ic_is_megamorphic_after_four_distinct_classes(_unused in 0..1u8) {
            let mut ic = InlineCache::new(0, "foo");
            for class in ["Integer", "Float", "String", "Array"] {
                if let IcQuery::Miss = ic.query(class) {
                    ic.update(class, MethodImpl::builtin(noop), 1);
                }
            }
            prop_assert_eq!(ic.state_kind(), IcStateKind::Megamorphic);
        }

        /// Invariant 7: hit + miss counters equal the number of dispatch calls at that site.
        #[test]
        fn ic_hit_plus_miss_equals_dispatch_count(classes in prop::collection::vec(class_pool(), 0..30)) {
            let mut ic = InlineCache::new(0, "foo");
            let mut count = 0u64;
            for class in classes {
                count += 1;
                match ic.query(class) {
                    IcQuery::Hit { .. } => ic.record_hit(),
                    IcQuery::Miss => {
                        ic.update(class, MethodImpl::builtin(noop), 1);
                        ic.record_miss();
                    }
                }
            }
            prop_assert_eq!(ic.hits() + ic.misses(), count);
        }
    }
}
