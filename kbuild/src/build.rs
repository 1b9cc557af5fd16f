//! The `all` pipeline.
//!
//! A [`BuildContext`] is computed fresh on every invocation: scan the source
//! root, pin the entry files to the front of their lists, derive object
//! paths. The context then yields an ordered plan of tool invocations
//! (assemble each `.asm`, compile each `.c`, link once) which is run one
//! step at a time.

use crate::config::BuildConfig;
use crate::error::{BuildError, StepError};
use crate::exec::ToolInvocation;
use crate::object;
use crate::order::{self, Placement};
use crate::scan::{self, SourceFile, SourceKind};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// One source and the object it compiles to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileUnit {
    pub source: SourceFile,
    pub object: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub asm: Vec<CompileUnit>,
    pub c: Vec<CompileUnit>,
}

/// What to do when an external tool fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing step.
    #[default]
    Abort,
    /// Run every step, then report all failures together.
    KeepGoing,
}

impl BuildContext {
    pub fn prepare(config: &BuildConfig) -> Result<Self> {
        let mut sources = scan::scan(&config.source_root)
            .with_context(|| format!("Scanning sources in {}", config.source_root.display()))?;

        pin_entry(&mut sources.asm, &config.asm_entry, SourceKind::Asm);
        pin_entry(&mut sources.c, &config.c_entry, SourceKind::C);

        for (shared, group) in
            object::collisions(&config.output_dir, sources.asm.iter().chain(&sources.c))
        {
            let names: Vec<String> = group.iter().map(|s| s.path.display().to_string()).collect();
            log::warn!(
                "{} sources map to {}: {}",
                group.len(),
                shared.display(),
                names.join(", ")
            );
        }

        let units = |list: Vec<SourceFile>| -> Vec<CompileUnit> {
            list.into_iter()
                .map(|source| CompileUnit {
                    object: object::object_path(&config.output_dir, &source),
                    source,
                })
                .collect()
        };

        Ok(Self {
            asm: units(sources.asm),
            c: units(sources.c),
        })
    }

    /// Object files in link order: assembly first, then C.
    pub fn objects(&self) -> impl Iterator<Item = &Path> {
        self.asm.iter().chain(&self.c).map(|u| u.object.as_path())
    }

    /// Every tool invocation of a full build, in execution order.
    pub fn plan(&self, config: &BuildConfig) -> Vec<ToolInvocation> {
        let mut steps: Vec<ToolInvocation> = Vec::with_capacity(self.asm.len() + self.c.len() + 1);
        steps.extend(self.asm.iter().map(|u| assemble(config, u)));
        steps.extend(self.c.iter().map(|u| compile(config, u)));
        steps.push(link(config, self.objects()));
        steps
    }

    /// Plain-text listing of the computed lists, one path per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let sections = [
            ("asm sources", &self.asm, true),
            ("asm objects", &self.asm, false),
            ("c sources", &self.c, true),
            ("c objects", &self.c, false),
        ];
        for (title, units, sources) in sections {
            let _ = writeln!(out, "{title}:");
            for unit in units {
                let path = if sources {
                    &unit.source.path
                } else {
                    &unit.object
                };
                let _ = writeln!(out, "  {}", path.display());
            }
        }
        out
    }

    pub fn write_dump(&self, path: &Path) -> Result<()> {
        fs::write(path, self.dump()).with_context(|| format!("Writing {}", path.display()))
    }
}

fn pin_entry(list: &mut Vec<SourceFile>, entry: &Path, kind: SourceKind) {
    let wanted = SourceFile::new(entry, kind);
    match order::move_element(list, &wanted, 0) {
        Placement::Moved { from, to } => {
            log::debug!("pinned {} at index {to} (was {from})", entry.display());
        }
        Placement::Missing => {
            log::warn!(
                "entry file {} not found among .{} sources; keeping discovery order",
                entry.display(),
                kind.extension()
            );
        }
    }
}

pub fn assemble(config: &BuildConfig, unit: &CompileUnit) -> ToolInvocation {
    ToolInvocation::new(&config.assembler)
        .args(&config.asm_flags)
        .arg(&unit.source.path)
        .arg("-o")
        .arg(&unit.object)
}

pub fn compile(config: &BuildConfig, unit: &CompileUnit) -> ToolInvocation {
    ToolInvocation::new(&config.compiler)
        .args(config.compiler_flags())
        .arg("-c")
        .arg(&unit.source.path)
        .arg("-o")
        .arg(&unit.object)
}

pub fn link<'a>(config: &BuildConfig, objects: impl IntoIterator<Item = &'a Path>) -> ToolInvocation {
    ToolInvocation::new(&config.linker)
        .args(config.linker_flags())
        .arg("-o")
        .arg(&config.target)
        .args(objects)
}

/// Run `steps` in order, blocking on each.
pub fn run_steps(
    steps: &[ToolInvocation],
    toolchain_dir: &Path,
    policy: FailurePolicy,
) -> Result<(), BuildError> {
    let mut failures: Vec<StepError> = Vec::new();
    for step in steps {
        if let Err(e) = step.run(toolchain_dir) {
            log::error!("{e}");
            failures.push(e);
            if policy == FailurePolicy::Abort {
                break;
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(BuildError { failures })
    }
}

pub fn build_all(config: &BuildConfig, policy: FailurePolicy) -> Result<()> {
    let ctx = BuildContext::prepare(config)?;
    log::info!(
        "{} assembly and {} C sources under {}",
        ctx.asm.len(),
        ctx.c.len(),
        config.source_root.display()
    );

    if let Some(log_path) = config.build_log.as_deref() {
        ctx.write_dump(log_path)?;
    }

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Creating {}", config.output_dir.display()))?;
    if let Some(parent) = config.target.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Creating {}", parent.display()))?;
    }

    let steps = ctx.plan(config);
    run_steps(&steps, &config.toolchain_dir, policy)?;

    println!("✅ Built {}", config.target.display());
    Ok(())
}
