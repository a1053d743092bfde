//! Project configuration discovery: walk parent directories from the source
//! file looking for a `gglang.config` key-value file, parse its two
//! recognized keys, and enforce their mutual-exclusivity rule. This crate
//! plays both orchestrator and driver, so it owns that validation itself
//! rather than leaving it to a separate front end.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use gglang_codegen::{CompileConfig, GcMode, MemoryLimit};

pub const CONFIG_FILE_NAME: &str = "gglang.config";

/// Walks `start_dir` and its ancestors looking for `gglang.config`. Returns
/// `Ok(CompileConfig::default())` (collector enabled, unlimited memory) if
/// none is found anywhere up to the filesystem root.
pub fn discover(start_dir: &Path) -> Result<CompileConfig> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            let text = std::fs::read_to_string(&candidate)
                .with_context(|| format!("reading {}", candidate.display()))?;
            return parse_and_validate(&text);
        }
    }
    Ok(CompileConfig::default())
}

fn parse_and_validate(text: &str) -> Result<CompileConfig> {
    let mut gc_mode = GcMode::Enabled;
    let mut memory_limit = MemoryLimit::UNLIMITED;

    for raw_line in text.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            bail!("malformed configuration line: `{raw_line}`");
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "garbage_collector" => {
                gc_mode = match value {
                    "enabled" => GcMode::Enabled,
                    "disabled" => GcMode::Disabled,
                    other => bail!("`garbage_collector` must be `enabled` or `disabled`, found `{other}`"),
                };
            }
            "memory_limit" => {
                memory_limit = parse_memory_limit(value)?;
            }
            other => bail!("unrecognized configuration key `{other}`"),
        }
    }

    if gc_mode == GcMode::Disabled && !memory_limit.is_unlimited() {
        bail!("`garbage_collector = disabled` and a non-zero `memory_limit` are mutually exclusive");
    }

    Ok(CompileConfig { gc_mode, memory_limit })
}

fn parse_memory_limit(value: &str) -> Result<MemoryLimit> {
    let value = value.trim();
    if value == "0" {
        return Ok(MemoryLimit::UNLIMITED);
    }
    let (digits, multiplier) = split_unit_suffix(value)?;
    let base: u64 = digits.parse().with_context(|| format!("invalid memory_limit value `{value}`"))?;
    Ok(MemoryLimit(base.saturating_mul(multiplier)))
}

fn split_unit_suffix(value: &str) -> Result<(&str, u64)> {
    let upper = value.to_ascii_uppercase();
    let suffixes: &[(&str, u64)] =
        &[("KB", 1024), ("MB", 1024 * 1024), ("GB", 1024 * 1024 * 1024), ("K", 1024), ("M", 1024 * 1024), ("G", 1024 * 1024 * 1024), ("B", 1)];
    for (suffix, multiplier) in suffixes {
        if let Some(prefix_len) = upper.strip_suffix(suffix).map(|stripped| stripped.len()) {
            return Ok((&value[..prefix_len], *multiplier));
        }
    }
    bail!("`memory_limit` value `{value}` has no recognized unit suffix")
}

/// Used by `gglang-compiler`'s own orchestration so a directly-constructed
/// `CompileConfig` (e.g. embedding, tests) never needs a directory to walk.
pub fn default_config() -> CompileConfig {
    CompileConfig::default()
}

pub fn config_path_candidates(start_dir: &Path) -> Vec<PathBuf> {
    start_dir.ancestors().map(|d| d.join(CONFIG_FILE_NAME)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_config_yields_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = discover(dir.path()).expect("discovery should not fail");
        assert_eq!(config.gc_mode, GcMode::Enabled);
        assert!(config.memory_limit.is_unlimited());
    }

    #[test]
    fn discovers_config_in_parent_directory() {
        let root = tempfile::tempdir().expect("tempdir");
        let nested = root.path().join("src").join("nested");
        std::fs::create_dir_all(&nested).expect("create nested dirs");
        let mut file = std::fs::File::create(root.path().join(CONFIG_FILE_NAME)).expect("create config");
        writeln!(file, "garbage_collector = disabled").expect("write config");
        let config = discover(&nested).expect("discovery should succeed");
        assert_eq!(config.gc_mode, GcMode::Disabled);
    }

    #[test]
    fn parses_memory_limit_with_mb_suffix() {
        let config = parse_and_validate("memory_limit = 64MB\n").expect("should parse");
        assert_eq!(config.memory_limit.0, 64 * 1024 * 1024);
    }

    #[test]
    fn rejects_disabled_gc_with_nonzero_memory_limit() {
        let err = parse_and_validate("garbage_collector = disabled\nmemory_limit = 1M\n").unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let config = parse_and_validate("# a comment\n\ngarbage_collector = enabled\n").expect("should parse");
        assert_eq!(config.gc_mode, GcMode::Enabled);
    }
}
