//! Lowering for calls on the built-in static classes (`Console`, `Math`,
//! `Memory`) and for extension-method calls on primitive receivers.

use crate::ctype::{printf_plan, PrintfPlan};
use gglang_ast::Expr;

/// `Math.<name>` and `Console.<name>` methods lower 1:1 to a `gg_<class>_*`
/// runtime symbol, e.g. `Math.sqrt` -> `gg_math_sqrt`.
pub fn lower_static_call(class_name: &str, method: &str) -> Option<String> {
    match class_name {
        "Math" => Some(format!("gg_math_{method}")),
        "Memory" => match method {
            "alloc" => Some("Memory_alloc".to_string()),
            "free" => Some("Memory_free".to_string()),
            other => Some(format!("Memory_{other}")),
        },
        "Console" => match method {
            "readLine" => Some("gg_console_readLine".to_string()),
            "readInt" => Some("gg_console_readInt".to_string()),
            // write/writeLine are handled specially (format-specifier
            // inference), never through this generic path.
            _ => None,
        },
        _ => None,
    }
}

/// `value.toString()`, `s.toUpper()`, etc. on a primitive receiver lower to
/// `gg_ext_<type>_<method>(value, args...)`.
pub fn lower_extension_call(receiver_type_name: &str, method: &str) -> String {
    format!("gg_ext_{receiver_type_name}_{method}")
}

/// Builds the `printf(...)` call for `Console.write`/`Console.writeLine`.
/// `arg_text` is the already-lowered C expression for the single argument;
/// `newline` appends `\n` to the format string.
pub fn console_print_call(arg: &Expr, arg_text: &str, newline: bool) -> String {
    let resolved = arg.resolved_type.clone().unwrap_or_else(gglang_ast::ResolvedType::object);
    let (format, value) = match printf_plan(&resolved) {
        PrintfPlan::Integer => ("%lld".to_string(), format!("(long long){arg_text}")),
        PrintfPlan::Floating => ("%g".to_string(), arg_text.to_string()),
        PrintfPlan::Boolean => ("%s".to_string(), format!("(({arg_text}) ? \"true\" : \"false\")")),
        PrintfPlan::Char => ("%c".to_string(), arg_text.to_string()),
        PrintfPlan::StringLike => ("%s".to_string(), string_arg_as_cstr(arg, arg_text)),
    };
    let full_format = if newline { format!("{format}\\n") } else { format };
    format!("printf(\"{full_format}\", {value})")
}

/// A string literal lowers straight to a C string literal, so it can be
/// passed to `printf("%s", ...)` without going through the runtime's
/// `gg_string` type at all; any other string-typed expression is already a
/// `gg_string*` and needs `gg_string_cstr` to get a `const char*` out of it.
fn string_arg_as_cstr(arg: &Expr, arg_text: &str) -> String {
    match &arg.kind {
        gglang_ast::ExprKind::StringLiteral(_) => arg_text.to_string(),
        _ => format!("gg_string_cstr({arg_text})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_method_lowers_to_runtime_symbol() {
        assert_eq!(lower_static_call("Math", "sqrt"), Some("gg_math_sqrt".to_string()));
    }

    #[test]
    fn extension_call_follows_naming_convention() {
        assert_eq!(lower_extension_call("int", "toString"), "gg_ext_int_toString");
    }

    #[test]
    fn writeline_int_uses_lld_format() {
        let mut arg = Expr::new(gglang_ast::ExprKind::IntLiteral(42), gglang_diagnostics::Position::new(1, 1));
        arg.resolved_type = Some(gglang_ast::ResolvedType::new("int"));
        let call = console_print_call(&arg, "42", true);
        assert!(call.contains("%lld"));
        assert!(call.contains("(long long)42"));
    }

    #[test]
    fn writeline_string_literal_uses_s_format_without_wrapping() {
        let mut arg =
            Expr::new(gglang_ast::ExprKind::StringLiteral("hi".to_string()), gglang_diagnostics::Position::new(1, 1));
        arg.resolved_type = Some(gglang_ast::ResolvedType::new("string"));
        let call = console_print_call(&arg, "\"hi\"", true);
        assert!(call.contains("%s"));
        assert!(call.contains("\"hi\""));
        assert!(!call.contains("gg_string_cstr"));
    }

    #[test]
    fn writeline_char_uses_c_format_not_cstr() {
        let mut arg = Expr::new(gglang_ast::ExprKind::CharLiteral('x'), gglang_diagnostics::Position::new(1, 1));
        arg.resolved_type = Some(gglang_ast::ResolvedType::new("char"));
        let call = console_print_call(&arg, "'x'", true);
        assert!(call.contains("%c"));
        assert!(call.contains("'x'"));
        assert!(!call.contains("gg_string_cstr"));
    }
}
