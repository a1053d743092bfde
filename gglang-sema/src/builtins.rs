//! The names the global scope knows about without any user declaration:
//! the built-in static classes `Console`, `Math`, `Memory`. Primitive type
//! names are recognized structurally via `ResolvedType::is_primitive`
//! rather than through this list.

use std::collections::HashSet;
use std::sync::OnceLock;

static BUILTIN_CLASSES: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn builtin_classes() -> &'static HashSet<&'static str> {
    BUILTIN_CLASSES.get_or_init(|| ["Console", "Math", "Memory"].into_iter().collect())
}

pub fn is_builtin_class(name: &str) -> bool {
    builtin_classes().contains(name)
}

pub fn builtin_class_names() -> impl Iterator<Item = &'static str> {
    builtin_classes().iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_three_builtins() {
        assert!(is_builtin_class("Console"));
        assert!(is_builtin_class("Math"));
        assert!(is_builtin_class("Memory"));
    }

    #[test]
    fn rejects_user_class_names() {
        assert!(!is_builtin_class("Animal"));
    }
}
