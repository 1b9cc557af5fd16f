use crate::config::BuildConfig;
use anyhow::Result;

/// Shell line that reproduces the PATH wiring used for tool invocations.
pub fn path_export(config: &BuildConfig) -> String {
    format!("export PATH=\"$PATH:{}\"", config.toolchain_dir.display())
}

pub fn run(config: &BuildConfig) -> Result<()> {
    // Pure string export so users can `eval "$(kbuild env)"`.
    println!("{}", path_export(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_path_export_appends_toolchain() {
        let config = BuildConfig::default().resolve(Path::new("/work"));
        assert_eq!(
            path_export(&config),
            "export PATH=\"$PATH:/usr/local/i386elfgcc/bin\""
        );
    }
}
