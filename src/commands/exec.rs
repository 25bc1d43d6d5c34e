//! `corm exec`, `corm build` and `corm test`.
//!
//! All three run a child process with the isolated package root applied.

use crate::config::{Layout, load_config};
use crate::isolate::{EnvironmentOverride, isolate_from_env};
use crate::run::{run_passthrough, tool_args};
use anyhow::{Result, bail};

fn isolated_env(layout: &Layout) -> Result<(EnvironmentOverride, String)> {
    let config = load_config(layout)?;
    let env = isolate_from_env(
        &layout.staging_root,
        &config.tool.root_var,
        config.tool.isolation,
    )?;
    Ok((env, config.tool.program))
}

pub fn run_exec(layout: &Layout, args: &[String]) -> Result<()> {
    let Some((program, rest)) = args.split_first() else {
        bail!("no exec target command");
    };
    let (env, _) = isolated_env(layout)?;
    run_passthrough(program, rest, &env)?;
    Ok(())
}

/// Run `<tool> <subcommand> [args...]`, e.g. `go build ./...`.
pub fn run_tool(layout: &Layout, subcommand: &str, args: &[String]) -> Result<()> {
    let (env, program) = isolated_env(layout)?;
    run_passthrough(&program, &tool_args(subcommand, args), &env)?;
    Ok(())
}
