use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

/// Compiles a single gglang source file to C.
#[derive(Parser)]
#[command(name = "gglang")]
#[command(version)]
#[command(about = "gglang compiler core", long_about = None)]
struct Cli {
    /// Input .gg file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the generated C source. Defaults to INPUT with a .c extension.
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Print diagnostics as a JSON array instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = gglang_compiler::compile_file(&cli.input)
        .with_context(|| format!("compiling {}", cli.input.display()))?;

    if cli.json {
        println!("{}", outcome.diagnostics.to_json());
    } else {
        for diagnostic in outcome.diagnostics.sorted() {
            eprintln!("{diagnostic}");
        }
    }

    let Some(c_source) = outcome.c_source else {
        return Ok(ExitCode::FAILURE);
    };

    let output_path = cli.output.unwrap_or_else(|| cli.input.with_extension("c"));
    std::fs::write(&output_path, c_source)
        .with_context(|| format!("writing {}", output_path.display()))?;
    log::info!("wrote {}", output_path.display());

    Ok(ExitCode::SUCCESS)
}
