//! `MethodKey`: the `(class-name, method-name)` pair the method registry is keyed on.
//!
//! Operator methods (`+`, `<=>`, `-@`, `+@`) and ordinary identifiers (`each`, `respond_to?`) are
//! both just interned `Name`s — per §9's design note, this crate canonicalizes operators to their
//! bare interned symbolic form at registration time rather than mixing string- and symbol-keyed
//! lookups.

use std::fmt;

use ruby_ir::Name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub type_name: Name,
    pub method_name: Name,
}

impl MethodKey {
    pub fn new(type_name: Name, method_name: Name) -> Self {
        MethodKey {
            type_name,
            method_name,
        }
    }

    /// Build a key from plain strings, interning both through the process-wide interner.
    pub fn of(type_name: &str, method_name: &str) -> Self {
        MethodKey::new(ruby_ir::intern(type_name), ruby_ir::intern(method_name))
    }

    pub fn display(self) -> String {
        format!(
            "{}#{}",
            ruby_ir::resolve(self.type_name),
            ruby_ir::resolve(self.method_name)
        )
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keys_with_same_names_are_equal() {
        let a = MethodKey::of("Integer", "+");
        let b = MethodKey::of("Integer", "+");
        assert_eq!(a, b);
    }

    #[test]
    fn keys_with_different_method_names_are_distinct() {
        let a = MethodKey::of("Integer", "+");
        let b = MethodKey::of("Integer", "-");
        assert_ne!(a, b);
    }

    #[test]
    fn display_shows_class_hash_method() {
        let key = MethodKey::of("String", "upcase");
        assert_eq!(key.display(), "String#upcase");
    }

    #[test]
    fn operator_methods_are_keyed_by_bare_symbolic_name() {
        let key = MethodKey::of("Integer", "<=>");
        assert_eq!(ruby_ir::resolve(key.method_name), "<=>");
    }
}
