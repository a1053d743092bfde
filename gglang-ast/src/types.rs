use serde::{Deserialize, Serialize};

/// A type as written in source: a name, optional array/nullable markers, and
/// optional generic arguments (parsed but not semantically enforced by this
/// core).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub is_array: bool,
    pub is_nullable: bool,
    pub generic_args: Vec<TypeRef>,
    pub pos: gglang_diagnostics::Position,
}

impl TypeRef {
    pub fn simple(name: impl Into<String>, pos: gglang_diagnostics::Position) -> Self {
        Self {
            name: name.into(),
            is_array: false,
            is_nullable: false,
            generic_args: Vec::new(),
            pos,
        }
    }
}

const NUMERIC_TYPES: &[&str] = &["byte", "short", "int", "long", "float", "double"];
const PRIMITIVE_EXTRA: &[&str] = &["bool", "char", "string", "void"];

/// Resolved type info: a name plus `is-array`/`is-nullable` flags, with the
/// numeric/primitive/void predicates derived from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedType {
    pub name: String,
    pub is_array: bool,
    pub is_nullable: bool,
}

impl ResolvedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_array: false, is_nullable: false }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_array: false, is_nullable: true }
    }

    pub fn array_of(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_array: true, is_nullable: false }
    }

    pub fn object() -> Self {
        Self::new("object")
    }

    pub fn is_numeric(&self) -> bool {
        !self.is_array && NUMERIC_TYPES.contains(&self.name.as_str())
    }

    pub fn is_primitive(&self) -> bool {
        !self.is_array && (self.is_numeric() || PRIMITIVE_EXTRA.contains(&self.name.as_str()))
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }

    pub fn is_object(&self) -> bool {
        self.name == "object"
    }

    pub fn from_type_ref(type_ref: &TypeRef) -> Self {
        Self {
            name: type_ref.name.clone(),
            is_array: type_ref.is_array,
            is_nullable: type_ref.is_nullable,
        }
    }
}

impl std::fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_array {
            write!(f, "[]")?;
        }
        if self.is_nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// The implicit numeric widening lattice: `false` if `from` cannot be
/// implicitly widened to `to`.
pub fn widens_to(from: &str, to: &str) -> bool {
    let rank = |name: &str| NUMERIC_TYPES.iter().position(|&n| n == name);
    match (rank(from), rank(to)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_widens_all_the_way_to_double() {
        assert!(widens_to("byte", "double"));
        assert!(widens_to("int", "long"));
        assert!(widens_to("float", "double"));
    }

    #[test]
    fn widening_is_directional() {
        assert!(!widens_to("double", "int"));
        assert!(!widens_to("long", "int"));
    }

    #[test]
    fn non_numeric_never_widens() {
        assert!(!widens_to("string", "int"));
    }
}
