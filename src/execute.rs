use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use bingorun::config::Config;
use bingorun::installer::{install_tool_if_missing, InstallOutcome};
use bingorun::locate::find_env_file;
use bingorun::manifest::read_tool_path;
use bingorun::util::kebab_to_upper_snake;
use crate::cli::{Invocation, USAGE};

pub fn execute(invocation: Invocation) -> Result<ExitCode> {
    match invocation {
        Invocation::Help => {
            print!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Version => {
            println!("Version: {}", version());
            Ok(ExitCode::SUCCESS)
        }
        Invocation::PrintBinPath { tool } => {
            let config = Config::from_env()?;
            let path = resolve_tool(&config, &tool)?;
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Run { tool, args } => {
            let config = Config::from_env()?;
            let path = resolve_tool(&config, &tool)?;
            execute_run(&path, &args)
        }
    }
}

/// `BINGORUN_VERSION` if injected at build time, otherwise the crate version
/// plus the `BINGORUN_REVISION` the binary was built from, if known.
pub fn version() -> String {
    if let Some(version) = option_env!("BINGORUN_VERSION").filter(|v| !v.is_empty()) {
        return version.to_string();
    }
    match option_env!("BINGORUN_REVISION").filter(|r| !r.is_empty()) {
        Some(revision) => format!("{} {}", env!("CARGO_PKG_VERSION"), revision),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Resolves `tool` to its pinned binary, installing it first if needed.
pub fn resolve_tool(config: &Config, tool: &str) -> Result<PathBuf> {
    let key = kebab_to_upper_snake(tool);
    let env_file = find_env_file(config)?;
    let bingo = env_file
        .parent()
        .ok_or_else(|| anyhow!("invalid bingo environment file: {}", env_file.display()))?;
    let path = read_tool_path(&env_file, &key, &config.gobin)?;
    debug!("{} resolved to {}", key, path.display());

    if install_tool_if_missing(bingo, &path, config)? == InstallOutcome::Installed {
        debug!("installed {}", path.display());
    }
    Ok(path)
}

pub fn execute_run(tool: &Path, args: &[OsString]) -> Result<ExitCode> {
    debug!("running {} {:?}", tool.display(), args);
    let status = Command::new(tool)
        .args(args)
        .status()
        .with_context(|| format!("failed to run {}", tool.display()))?;
    if status.success() {
        return Ok(ExitCode::SUCCESS);
    }
    match status.code().and_then(|code| u8::try_from(code).ok()) {
        Some(code) => Ok(ExitCode::from(code)),
        None => {
            warn!("{} terminated with {}", tool.display(), status);
            Ok(ExitCode::FAILURE)
        }
    }
}
