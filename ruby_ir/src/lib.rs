//! Interned identifiers shared by the Ruby evaluation core.
//!
//! Class names, method names, and symbols are represented as [`Name`], a compact handle into a
//! process-wide [`StringInterner`]. Equality of method names is identity of the interned form, as
//! required by the dispatch engine's call-site keying.

mod interner;
mod name;

pub use interner::{global, intern, resolve, InternError, StringInterner};
pub use name::Name;
