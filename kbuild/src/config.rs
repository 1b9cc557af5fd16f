//! Build configuration.
//!
//! Defaults describe the i386 kernel tree this tool was written for. A JSON
//! file can override any field; relative paths are resolved against the
//! working directory once at startup and the result is read-only afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kbuild.json";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub source_root: PathBuf,
    pub output_dir: PathBuf,
    pub target: PathBuf,
    pub toolchain_dir: PathBuf,

    pub assembler: String,
    pub compiler: String,
    pub linker: String,

    pub asm_flags: Vec<String>,
    pub c_flags: Vec<String>,
    pub include_dir: PathBuf,
    pub ld_flags: Vec<String>,
    pub linker_script: PathBuf,

    /// Pinned to index 0 of the assembly list.
    pub asm_entry: PathBuf,
    /// Pinned to index 0 of the C list.
    pub c_entry: PathBuf,

    pub iso_script: PathBuf,
    pub run_script: PathBuf,
    pub script_shell: String,

    /// Plain-text dump of the computed lists; `None` disables it.
    pub build_log: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            output_dir: PathBuf::from("bin"),
            target: PathBuf::from("bin/doom_os.elf"),
            toolchain_dir: PathBuf::from("/usr/local/i386elfgcc/bin"),
            assembler: "nasm".to_string(),
            compiler: "i386-elf-gcc".to_string(),
            linker: "i386-elf-ld".to_string(),
            asm_flags: strings(&["-O2", "-f", "elf32"]),
            c_flags: strings(&["-ffreestanding", "-m32", "-O2", "-g"]),
            include_dir: PathBuf::from("include"),
            ld_flags: strings(&["-O2"]),
            linker_script: PathBuf::from("linker.ld"),
            asm_entry: PathBuf::from("asm/grub_entry.asm"),
            c_entry: PathBuf::from("src/core/kernel.c"),
            iso_script: PathBuf::from("scripts/makeiso.sh"),
            run_script: PathBuf::from("scripts/run.sh"),
            script_shell: "sh".to_string(),
            build_log: Some(PathBuf::from("log.log")),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl BuildConfig {
    /// Load the configuration for this process.
    ///
    /// An explicit `path` must exist. Without one, `kbuild.json` in `cwd` is
    /// used if present, otherwise the defaults. `root` replaces `source_root`.
    pub fn load(path: Option<&Path>, root: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let implicit = cwd.join(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(&implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(root) = root {
            config.source_root = root.to_path_buf();
        }

        Ok(config.resolve(cwd))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Parsing config {}", path.display()))
    }

    /// Make every path field absolute against `cwd`.
    pub fn resolve(mut self, cwd: &Path) -> Self {
        let abs = |p: &Path| absolute(cwd, p);
        self.source_root = abs(&self.source_root);
        self.output_dir = abs(&self.output_dir);
        self.target = abs(&self.target);
        self.toolchain_dir = abs(&self.toolchain_dir);
        self.include_dir = abs(&self.include_dir);
        self.linker_script = abs(&self.linker_script);
        self.asm_entry = abs(&self.asm_entry);
        self.c_entry = abs(&self.c_entry);
        self.iso_script = abs(&self.iso_script);
        self.run_script = abs(&self.run_script);
        self.build_log = self.build_log.as_deref().map(abs);
        self
    }

    /// Compiler arguments that precede `-c <src> -o <obj>`.
    pub fn compiler_flags(&self) -> Vec<String> {
        let mut flags = self.c_flags.clone();
        flags.push("-I".to_string());
        flags.push(self.include_dir.display().to_string());
        flags
    }

    /// Linker arguments that precede `-o <target> <objects...>`.
    pub fn linker_flags(&self) -> Vec<String> {
        let mut flags = vec![format!("-T{}", self.linker_script.display())];
        flags.extend(self.ld_flags.iter().cloned());
        flags
    }
}

/// Join `path` onto `cwd` unless it is already absolute, dropping `.` components.
pub fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    joined.components().collect()
}
