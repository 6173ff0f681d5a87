#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

use esast::cli::args::CliArgs;
use esast::cli::commands;

fn main() -> Result<ExitCode> {
    // Initialize tracing if ESAST_LOG or RUST_LOG is set (zero cost otherwise).
    esast::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let passed = commands::run(&args, &mut out)?;
    out.flush()?;

    if !passed {
        eprintln!("esast: check failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
