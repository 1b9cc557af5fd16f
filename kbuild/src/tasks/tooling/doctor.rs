use crate::config::BuildConfig;
use anyhow::{bail, Result};
use std::path::Path;

/// Result of a single doctor check.
#[derive(Debug, PartialEq, Eq)]
pub struct Check {
    pub ok: bool,
    pub message: String,
}

impl Check {
    fn new(ok: bool, message: String) -> Self {
        Self { ok, message }
    }
}

/// Collect every check without printing anything.
pub fn checks(config: &BuildConfig, cwd: &Path) -> Result<Vec<Check>> {
    let search_path = crate::util::tools_env::augmented_path(&config.toolchain_dir)?;
    let mut out = Vec::new();

    for tool in [
        &config.assembler,
        &config.compiler,
        &config.linker,
        &config.script_shell,
    ] {
        out.push(match which::which_in(tool, Some(&search_path), cwd) {
            Ok(found) => Check::new(true, format!("{tool} ({})", found.display())),
            Err(_) => Check::new(false, format!("missing `{tool}` in PATH")),
        });
    }

    if config.toolchain_dir.is_dir() {
        out.push(Check::new(true, config.toolchain_dir.display().to_string()));
    } else {
        out.push(Check::new(
            false,
            format!("missing toolchain directory: {}", config.toolchain_dir.display()),
        ));
    }

    if config.include_dir.is_dir() {
        out.push(Check::new(true, config.include_dir.display().to_string()));
    } else {
        out.push(Check::new(
            false,
            format!("missing include directory: {}", config.include_dir.display()),
        ));
    }

    for (what, file) in [
        ("linker script", &config.linker_script),
        ("ISO script", &config.iso_script),
        ("run script", &config.run_script),
    ] {
        if file.is_file() {
            out.push(Check::new(true, file.display().to_string()));
        } else {
            out.push(Check::new(false, format!("missing {what}: {}", file.display())));
        }
    }

    Ok(out)
}

pub fn run(config: &BuildConfig, cwd: &Path) -> Result<()> {
    let results = checks(config, cwd)?;
    for check in &results {
        if check.ok {
            eprintln!("[OK] {}", check.message);
        } else {
            eprintln!("[FAIL] {}", check.message);
        }
    }

    if results.iter().any(|c| !c.ok) {
        bail!("doctor checks failed");
    }
    Ok(())
}
