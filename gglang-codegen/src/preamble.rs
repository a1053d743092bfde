//! The fixed text every emitted translation unit opens with: standard
//! headers, the runtime header, and — when the project configuration
//! disables the collector — the `GG_NO_GC` guard plus the memory-limit call.

use crate::config::CompileConfig;

pub fn emit_preamble(config: &CompileConfig) -> String {
    let mut out = String::new();
    if let Some(guard) = config.no_gc_guard_token() {
        out.push_str(&format!("#define {guard} 1\n"));
    }
    out.push_str("#include <stdio.h>\n");
    out.push_str("#include <stdlib.h>\n");
    out.push_str("#include <string.h>\n");
    out.push_str("#include <stdbool.h>\n");
    out.push_str("#include <stdint.h>\n");
    out.push_str("#include \"gglang_runtime.h\"\n\n");
    out.push_str("__attribute__((constructor))\n");
    out.push_str("static void gg_program_init(void) {\n");
    if !config.memory_limit.is_unlimited() {
        out.push_str(&format!("    gg_gc_set_memory_limit({}ULL);\n", config.memory_limit.0));
    }
    out.push_str("}\n\n");
    out
}
