//! Source-type → C-type mapping, used both for struct/signature emission and
//! for the `Console.writeLine` format-specifier inference.

use gglang_ast::ResolvedType;

/// The C type a scalar (non-array) source name lowers to.
pub fn scalar_c_type(name: &str) -> String {
    match name {
        "byte" => "int8_t".to_string(),
        "short" => "int16_t".to_string(),
        "int" => "int32_t".to_string(),
        "long" => "int64_t".to_string(),
        "float" => "float".to_string(),
        "double" => "double".to_string(),
        "bool" => "bool".to_string(),
        "char" => "char".to_string(),
        "string" => "gg_string*".to_string(),
        "void" => "void".to_string(),
        "object" => "void*".to_string(),
        class_name => format!("{class_name}*"),
    }
}

/// The C type a fully resolved type lowers to: arrays are a pointer to the
/// element's scalar C type.
pub fn c_type(resolved: &ResolvedType) -> String {
    if resolved.is_array {
        format!("{}*", scalar_c_type(&resolved.name))
    } else {
        scalar_c_type(&resolved.name)
    }
}

/// Whether a value of this type is a GC-managed reference that needs a root
/// slot — every non-primitive type, which already covers arrays (see
/// `ResolvedType::is_primitive`).
pub fn is_reference_type(resolved: &ResolvedType) -> bool {
    !resolved.is_primitive()
}

/// The `printf` conversion plan for `Console.write`/`writeLine`: integers
/// print via `%lld` with an explicit cast, floats via `%g`, strings via
/// `%s`, booleans via a ternary printed as `%s`.
pub enum PrintfPlan {
    /// `%lld`, argument is cast to `(long long)`.
    Integer,
    /// `%g`, argument printed as-is.
    Floating,
    /// `%s`, argument is a `const char*`-compatible expression.
    StringLike,
    /// `%s`, argument is wrapped in a `cond ? "true" : "false"` ternary.
    Boolean,
    /// `%c`, argument is a C `char` printed as-is.
    Char,
}

pub fn printf_plan(resolved: &ResolvedType) -> PrintfPlan {
    if resolved.is_array {
        return PrintfPlan::StringLike;
    }
    match resolved.name.as_str() {
        "byte" | "short" | "int" | "long" => PrintfPlan::Integer,
        "float" | "double" => PrintfPlan::Floating,
        "bool" => PrintfPlan::Boolean,
        "char" => PrintfPlan::Char,
        "string" => PrintfPlan::StringLike,
        _ => PrintfPlan::StringLike,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_maps_to_int32() {
        assert_eq!(scalar_c_type("int"), "int32_t");
    }

    #[test]
    fn class_name_becomes_pointer() {
        assert_eq!(scalar_c_type("Animal"), "Animal*");
    }

    #[test]
    fn array_of_int_is_pointer_to_int32() {
        let rt = ResolvedType::array_of("int");
        assert_eq!(c_type(&rt), "int32_t*");
    }

    #[test]
    fn primitives_are_not_reference_types() {
        assert!(!is_reference_type(&ResolvedType::new("int")));
        assert!(!is_reference_type(&ResolvedType::new("string")));
    }

    #[test]
    fn class_and_object_are_reference_types() {
        assert!(is_reference_type(&ResolvedType::new("Animal")));
        assert!(is_reference_type(&ResolvedType::object()));
    }

    #[test]
    fn char_gets_its_own_printf_plan_not_string_like() {
        assert!(matches!(printf_plan(&ResolvedType::new("char")), PrintfPlan::Char));
    }
}
