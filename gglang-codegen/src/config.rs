//! The two emitter-visible project settings: garbage-collector mode and
//! memory limit. Discovery (walking parent directories, parsing the
//! key-value file) is `gglang-compiler`'s job; this crate only needs the
//! parsed result.

/// Whether the emitted program runs with the runtime's tracing collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcMode {
    Enabled,
    Disabled,
}

/// Parsed form of the `memory_limit` key: `0` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLimit(pub u64);

impl MemoryLimit {
    pub const UNLIMITED: MemoryLimit = MemoryLimit(0);

    pub fn is_unlimited(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileConfig {
    pub gc_mode: GcMode,
    pub memory_limit: MemoryLimit,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self { gc_mode: GcMode::Enabled, memory_limit: MemoryLimit::UNLIMITED }
    }
}

impl CompileConfig {
    pub fn no_gc_guard_token(&self) -> Option<&'static str> {
        match self.gc_mode {
            GcMode::Disabled => Some("GG_NO_GC"),
            GcMode::Enabled => None,
        }
    }
}
