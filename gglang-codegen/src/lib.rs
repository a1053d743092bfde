//! Translates an analyzed `CompilationUnit` into a single C translation
//! unit: a textual, non-optimizing lowering of the object model, control
//! flow, and runtime calls.
//!
//! [`emit`] assumes the unit has already been through `gglang_sema::analyze`
//! with zero errors in the resulting diagnostic bag — the orchestrating
//! `gglang-compiler` crate is responsible for that gate.

pub mod builtins_emit;
pub mod class_emit;
pub mod config;
pub mod ctx;
pub mod ctype;
pub mod expr_emit;
pub mod preamble;
pub mod stmt_emit;

use gglang_ast::CompilationUnit;
use gglang_sema::class_info::ClassTable;

pub use config::{CompileConfig, GcMode, MemoryLimit};

/// Emits the full C source text for `unit`. `class_table` is the table
/// produced by semantic analysis of the same unit.
pub fn emit(unit: &CompilationUnit, class_table: &ClassTable, config: &CompileConfig) -> String {
    let classes = class_emit::class_decls(unit);
    let decl_map = class_emit::build_decl_map(&classes);

    let mut out = String::new();
    out.push_str(&preamble::emit_preamble(config));
    out.push_str(&class_emit::emit_forward_decls(&classes));
    out.push_str(&class_emit::emit_struct_defs(&classes, class_table, &decl_map));
    out.push_str(&class_emit::emit_prototypes(&classes, class_table, &decl_map));
    out.push_str(&class_emit::emit_implementations(&classes, class_table, &decl_map));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gglang_sema::analyze;

    fn compile_to_c(source: &str) -> String {
        let (mut unit, diagnostics) = gglang_parser::parse(source, Some("test.gg"));
        assert!(!diagnostics.has_errors(), "parse errors: {:?}", diagnostics.diagnostics());
        let result = analyze(&mut unit);
        assert!(!result.diagnostics.has_errors(), "analysis errors: {:?}", result.diagnostics.diagnostics());
        emit(&unit, &result.class_table, &CompileConfig::default())
    }

    #[test]
    fn emits_struct_with_vtable_pointer_first() {
        let c = compile_to_c("class Program { static void main() { Console.writeLine(\"hi\"); } }");
        assert!(c.contains("struct Program {\n    Program_VTable* vtable;\n"));
    }

    #[test]
    fn emits_construct_and_create_prototypes() {
        let c = compile_to_c("class Counter { int value; Counter(int v) { value = v; } }");
        assert!(c.contains("void Counter_construct(Counter* self, int32_t v);"));
        assert!(c.contains("Counter* Counter_create(int32_t v);"));
    }

    #[test]
    fn instance_method_prototype_takes_self_first() {
        let c = compile_to_c("class Counter { int value; int get() { return value; } }");
        assert!(c.contains("int32_t Counter_get(Counter* self);"));
    }

    #[test]
    fn base_constructor_chains_before_vtable_assignment() {
        let source = "class Animal { string name; Animal(string n) { name = n; } }\n\
                      class Dog : Animal { Dog(string n) : base(n) { } }";
        let c = compile_to_c(source);
        assert!(c.contains("Animal_construct((Animal*)self, n);"));
        let base_call_idx = c.find("Animal_construct((Animal*)self, n);").unwrap();
        let vtable_idx = c.find("self->vtable = &Dog_vtable_instance;").unwrap();
        assert!(base_call_idx < vtable_idx);
    }

    #[test]
    fn console_writeline_int_uses_lld_format() {
        let c = compile_to_c("class Program { static void main() { Console.writeLine(42); } }");
        assert!(c.contains("printf(\"%lld\\n\", (long long)42)"));
    }

    #[test]
    fn overridden_virtual_method_dispatches_through_vtable() {
        let source = "class Animal { virtual void speak() { } }\n\
                      class Dog : Animal { override void speak() { } }\n\
                      class Program { static void main() { Animal a = new Dog(); a.speak(); } }";
        let c = compile_to_c(source);
        assert!(c.contains(".speak = Dog_speak,"));
        assert!(c.contains("->vtable->speak("));
    }

    #[test]
    fn inherited_non_overridden_virtual_gets_wrapper() {
        let source = "class Animal { virtual void speak() { } }\n\
                      class Dog : Animal { }";
        let c = compile_to_c(source);
        assert!(c.contains("static void Dog_speak_wrapper(Dog* self)"));
        assert!(c.contains("Animal_speak((Animal*)self);"));
        assert!(c.contains(".speak = Dog_speak_wrapper,"));
    }

    #[test]
    fn reference_typed_method_parameter_is_registered_as_a_gc_root() {
        let source = "class Box { int value; }\n\
                      class Program { static void use(Box b) { } }";
        let c = compile_to_c(source);
        assert!(c.contains("gg_gc_add_root((void**)&b);"));
    }

    #[test]
    fn reference_typed_constructor_parameter_is_registered_as_a_gc_root() {
        let source = "class Box { int value; }\n\
                      class Wrapper { Box inner; Wrapper(Box b) { inner = b; } }";
        let c = compile_to_c(source);
        assert!(c.contains("gg_gc_add_root((void**)&b);"));
    }

    #[test]
    fn primitive_parameter_is_not_registered_as_a_gc_root() {
        let source = "class Program { static void use(int x) { } }";
        let c = compile_to_c(source);
        assert!(!c.contains("gg_gc_add_root((void**)&x);"));
    }
}
