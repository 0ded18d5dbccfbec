//! Stack-growth guard for re-entrant dispatch (§5: built-in methods may call back into
//! `dispatch`, e.g. block-based iteration, and deep Ruby-level recursion must not blow the host
//! stack).

#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before running `f`. Grows the stack when the
/// remaining space drops below the red zone; a no-op on WASM, which manages its own stack.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn shallow_recursion_completes() {
        fn factorial(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
        }
        assert_eq!(factorial(10), 3_628_800);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn deep(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep(n - 1) + 1 })
        }
        assert_eq!(deep(200_000), 200_000);
    }
}
