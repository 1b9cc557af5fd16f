use anyhow::Result;
use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// The inherited `PATH` with the toolchain directory appended.
pub fn augmented_path(toolchain_dir: &Path) -> Result<OsString> {
    let existing_path = env::var_os("PATH").unwrap_or_default();
    let mut paths: Vec<_> = env::split_paths(&existing_path).collect();
    paths.push(toolchain_dir.to_path_buf());
    Ok(env::join_paths(paths)?)
}

/// Applies the toolchain `PATH` wiring to a command; the rest of the
/// environment is inherited unchanged.
pub fn apply_to_command(cmd: &mut Command, toolchain_dir: &Path) -> Result<()> {
    cmd.env("PATH", augmented_path(toolchain_dir)?);
    Ok(())
}
