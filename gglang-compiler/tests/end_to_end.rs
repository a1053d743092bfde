//! End-to-end scenarios compiled straight from gglang source to C text.
//! These assert on structural snippets in the emitted C rather than
//! invoking an actual C compiler — the C toolchain and the runtime library
//! are both external collaborators outside this crate's reach.

use gglang_compiler::{compile_source, CompileConfig};

#[test]
fn hello_world_prints_via_console_writeline() {
    let source = r#"class Program { static void main() { Console.writeLine("Hello, World!"); } }"#;
    let outcome = compile_source(source, Some("hello.gg"), &CompileConfig::default());
    assert!(outcome.succeeded());
    let c = outcome.c_source.expect("emitted");
    assert!(c.contains(r#"printf("%s\n", "Hello, World!")"#));
}

#[test]
fn arithmetic_expressions_lower_to_c_operators() {
    let source = r#"
        class Program {
            static void main() {
                Console.writeLine(10 + 20);
                Console.writeLine(50 - 15);
                Console.writeLine(6 * 7);
            }
        }
    "#;
    let outcome = compile_source(source, Some("arith.gg"), &CompileConfig::default());
    assert!(outcome.succeeded());
    let c = outcome.c_source.expect("emitted");
    assert!(c.contains("(10 + 20)"));
    assert!(c.contains("(50 - 15)"));
    assert!(c.contains("(6 * 7)"));
}

#[test]
fn virtual_override_dispatches_through_vtable_slot() {
    let source = r#"
        class Animal {
            virtual void speak() { Console.writeLine("..."); }
        }
        class Dog : Animal {
            override void speak() { Console.writeLine("Woof!"); }
        }
        class Cat : Animal {
            override void speak() { Console.writeLine("Meow!"); }
        }
        class Program {
            static void main() {
                Animal a = new Dog();
                Animal b = new Cat();
                a.speak();
                b.speak();
            }
        }
    "#;
    let outcome = compile_source(source, Some("animals.gg"), &CompileConfig::default());
    assert!(outcome.succeeded());
    let c = outcome.c_source.expect("emitted");
    assert!(c.contains("Woof!"));
    assert!(c.contains("Meow!"));
    assert!(c.contains("a->vtable->speak(a)"));
    assert!(c.contains(".speak = Dog_speak,"));
    assert!(c.contains(".speak = Cat_speak,"));
}

#[test]
fn duplicate_type_declaration_is_a_blocking_error() {
    let source = "class Program { } class Program { }";
    let outcome = compile_source(source, Some("dup.gg"), &CompileConfig::default());
    assert!(!outcome.succeeded());
    assert!(outcome.diagnostics.has_errors());
}
