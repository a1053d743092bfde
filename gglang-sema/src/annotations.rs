//! Annotation arity validation and the deprecated/removed tracking tables.

use dashmap::DashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    ClassOnly,
    ClassOrMethod,
    Any,
}

pub struct AnnotationRule {
    pub min_args: usize,
    pub max_args: usize,
    pub placement: Placement,
}

/// Looks up the arity/placement rule for a known annotation name. Unknown
/// names are accepted silently by the caller (`None` here, not an error).
pub fn lookup(name: &str) -> Option<AnnotationRule> {
    match name {
        "Library" => Some(AnnotationRule { min_args: 2, max_args: 2, placement: Placement::ClassOnly }),
        "Deprecated" => Some(AnnotationRule { min_args: 0, max_args: 2, placement: Placement::ClassOrMethod }),
        "Removed" => Some(AnnotationRule { min_args: 0, max_args: 2, placement: Placement::ClassOrMethod }),
        "Test" => Some(AnnotationRule { min_args: 0, max_args: 0, placement: Placement::Any }),
        _ => None,
    }
}

/// A recorded `[@Deprecated(...)]`/`[@Removed(...)]` annotation: an optional
/// free-text message and an optional version/removal-version string.
#[derive(Debug, Clone, Default)]
pub struct AnnotationNote {
    pub message: Option<String>,
    pub version: Option<String>,
}

impl AnnotationNote {
    pub fn from_args(args: &[String]) -> Self {
        Self { message: args.first().cloned(), version: args.get(1).cloned() }
    }
}

/// The four maps the body-walk pass consults at every use site, keyed by
/// class name (for class-level annotations) or `"ClassName.methodName"` (for
/// method-level ones). Populated in pass 2/3 and read for the remainder of
/// analysis, so a concurrent map grounded in the same pattern the interning
/// cache uses fits better than a plain `HashMap` behind a lock.
#[derive(Debug, Default)]
pub struct DeprecationTables {
    pub deprecated_classes: DashMap<String, AnnotationNote>,
    pub removed_classes: DashMap<String, AnnotationNote>,
    pub deprecated_methods: DashMap<String, AnnotationNote>,
    pub removed_methods: DashMap<String, AnnotationNote>,
}

impl DeprecationTables {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn method_key(class_name: &str, method_name: &str) -> String {
    format!("{class_name}.{method_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_requires_exactly_two_args() {
        let rule = lookup("Library").unwrap();
        assert_eq!((rule.min_args, rule.max_args), (2, 2));
        assert_eq!(rule.placement, Placement::ClassOnly);
    }

    #[test]
    fn unknown_annotation_has_no_rule() {
        assert!(lookup("NotARealAnnotation").is_none());
    }

    #[test]
    fn method_key_joins_class_and_method() {
        assert_eq!(method_key("Animal", "speak"), "Animal.speak");
    }
}
