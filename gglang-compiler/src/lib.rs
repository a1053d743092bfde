//! Orchestrates the four phases of the core — lex, parse, analyze, emit —
//! over a single source file, gating the emitter on the diagnostic bag's
//! error count: codegen never runs over a tree that failed analysis.

pub mod config;

use std::path::Path;

use anyhow::{Context, Result};
use gglang_diagnostics::DiagnosticBag;

pub use gglang_codegen::CompileConfig;

/// The result of a full compile run. `c_source` is only populated when the
/// analyzer reported zero errors; otherwise it's `None` and `diagnostics`
/// explains why.
pub struct CompileOutcome {
    pub diagnostics: DiagnosticBag,
    pub c_source: Option<String>,
}

impl CompileOutcome {
    pub fn succeeded(&self) -> bool {
        self.c_source.is_some()
    }
}

/// Reads `path`, discovers its project configuration by walking parent
/// directories, and compiles it to C source text.
pub fn compile_file(path: &Path) -> Result<CompileOutcome> {
    log::info!("reading source file {}", path.display());
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let compile_config = config::discover(dir)?;
    let file_name = path.to_string_lossy().into_owned();
    Ok(compile_source(&source, Some(&file_name), &compile_config))
}

/// Compiles already-loaded `source` text with an explicit, already-resolved
/// `config` — the path embedders and tests take to skip filesystem
/// discovery entirely.
pub fn compile_source(source: &str, file: Option<&str>, config: &CompileConfig) -> CompileOutcome {
    log::debug!("lexing and parsing");
    let (mut unit, mut diagnostics) = gglang_parser::parse(source, file);
    log::info!("parsed {} top-level declarations", unit.types.len());

    log::debug!("running semantic analysis");
    let analysis = gglang_sema::analyze(&mut unit);
    diagnostics.extend(analysis.diagnostics);

    if diagnostics.has_errors() {
        log::warn!("analysis reported {} error(s); skipping codegen", diagnostics.error_count());
        return CompileOutcome { diagnostics, c_source: None };
    }

    log::debug!("emitting C source");
    let c_source = gglang_codegen::emit(&unit, &analysis.class_table, config);
    log::info!("emitted {} bytes of C source", c_source.len());
    CompileOutcome { diagnostics, c_source: Some(c_source) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_compiles_with_no_errors() {
        let source = r#"class Program { static void main() { Console.writeLine("Hello, World!"); } }"#;
        let outcome = compile_source(source, Some("hello.gg"), &CompileConfig::default());
        assert!(!outcome.diagnostics.has_errors());
        assert!(outcome.succeeded());
        let c = outcome.c_source.expect("emitted");
        assert!(c.contains("Program_main"));
        assert!(c.contains("Hello, World!"));
    }

    #[test]
    fn undefined_base_class_blocks_codegen() {
        let source = "class Dog : Ghost { }";
        let outcome = compile_source(source, Some("bad.gg"), &CompileConfig::default());
        assert!(outcome.diagnostics.has_errors());
        assert!(!outcome.succeeded());
    }

    #[test]
    fn no_gc_config_emits_guard_define() {
        let source = "class Program { static void main() { } }";
        let config = CompileConfig { gc_mode: gglang_codegen::GcMode::Disabled, memory_limit: gglang_codegen::MemoryLimit::UNLIMITED };
        let outcome = compile_source(source, Some("p.gg"), &config);
        let c = outcome.c_source.expect("emitted");
        assert!(c.contains("#define GG_NO_GC 1"));
    }
}
