//! `iso` and `run`: hand off to the repository's shell scripts.
//!
//! The scripts take no arguments and do their own work (producing the ISO,
//! launching the emulator). Only their exit status is observed.

use crate::config::BuildConfig;
use crate::exec::ToolInvocation;
use anyhow::Result;
use std::path::Path;

pub fn invocation(config: &BuildConfig, script: &Path) -> ToolInvocation {
    ToolInvocation::new(&config.script_shell).arg(script)
}

pub fn create_iso(config: &BuildConfig) -> Result<()> {
    println!("💿 Creating ISO image...");
    invocation(config, &config.iso_script).run(&config.toolchain_dir)?;
    Ok(())
}

pub fn run_os(config: &BuildConfig) -> Result<()> {
    println!("🚀 Launching kernel...");
    invocation(config, &config.run_script).run(&config.toolchain_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_invocation_has_script_as_only_argument() {
        let config = BuildConfig::default().resolve(Path::new("/work"));
        let inv = invocation(&config, &config.iso_script);
        assert_eq!(inv.program(), "sh");
        assert_eq!(inv.get_args(), &["/work/scripts/makeiso.sh"]);
    }

    #[test]
    fn test_run_os_executes_script() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("launched");
        fs::create_dir_all(dir.path().join("scripts")).unwrap();
        fs::write(
            dir.path().join("scripts/run.sh"),
            format!("touch '{}'\n", marker.display()),
        )
        .unwrap();

        let config = BuildConfig::default().resolve(dir.path());
        run_os(&config).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn test_failing_script_is_reported() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("scripts")).unwrap();
        fs::write(dir.path().join("scripts/makeiso.sh"), "exit 4\n").unwrap();

        let config = BuildConfig::default().resolve(dir.path());
        let err = create_iso(&config).unwrap_err();
        assert!(err.to_string().contains("failed"));
    }
}
