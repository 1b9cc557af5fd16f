//! Source discovery.
//!
//! Walks the source root top-down and collects `.asm` and `.c` files. Any
//! directory whose name starts with `.` is skipped together with its subtree.
//! Symlinked directories are not followed. Entries are sorted by name and a
//! directory's files come before its subdirectories, so the order does not
//! depend on the filesystem.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Asm,
    C,
}

impl SourceKind {
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::Asm => "asm",
            SourceKind::C => "c",
        }
    }

    /// Suffix that replaces the source extension on the object file.
    pub fn object_suffix(self) -> &'static str {
        match self {
            SourceKind::Asm => ".asm.o",
            SourceKind::C => ".c.o",
        }
    }

    pub fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "asm" => Some(SourceKind::Asm),
            "c" => Some(SourceKind::C),
            _ => None,
        }
    }
}

/// A discovered source file. `path` is absolute when the scan root is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Sources split by kind, each list in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSet {
    pub asm: Vec<SourceFile>,
    pub c: Vec<SourceFile>,
}

impl SourceSet {
    pub fn list_mut(&mut self, kind: SourceKind) -> &mut Vec<SourceFile> {
        match kind {
            SourceKind::Asm => &mut self.asm,
            SourceKind::C => &mut self.c,
        }
    }
}

pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Collect every assembly and C source under `root`.
pub fn scan(root: &Path) -> Result<SourceSet> {
    let mut set = SourceSet::default();
    scan_recursive(root, &mut set)?;
    Ok(set)
}

fn scan_recursive(dir: &Path, set: &mut SourceSet) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Reading directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Listing directory {}", dir.display()))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Reading file type of {}", path.display()))?;
        // file_type() does not follow symlinks: a link to a directory is
        // neither descended nor treated as a source.
        if file_type.is_symlink() && path.is_dir() {
            log::trace!("not following directory link {}", path.display());
        } else if file_type.is_dir() {
            if is_hidden(&path) {
                log::trace!("skipping hidden directory {}", path.display());
            } else {
                subdirs.push(path);
            }
        } else if let Some(kind) = SourceKind::of(&path) {
            set.list_mut(kind).push(SourceFile::new(path, kind));
        }
    }

    for subdir in subdirs {
        scan_recursive(&subdir, set)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn names(files: &[SourceFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(SourceKind::of(Path::new("a/boot.asm")), Some(SourceKind::Asm));
        assert_eq!(SourceKind::of(Path::new("kernel.c")), Some(SourceKind::C));
        assert_eq!(SourceKind::of(Path::new("kernel.h")), None);
        assert_eq!(SourceKind::of(Path::new("kernel.c.o")), None);
        assert_eq!(SourceKind::of(Path::new("Makefile")), None);
    }

    #[test]
    fn test_scan_finds_sources_at_any_depth() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "asm/grub_entry.asm");
        touch(root, "asm/helpers.asm");
        touch(root, "src/core/kernel.c");
        touch(root, "src/driver/vga.c");
        touch(root, "src/driver/vga.h");
        touch(root, "top.c");
        touch(root, "README.md");

        let set = scan(root).unwrap();
        assert_eq!(names(&set.asm), vec!["grub_entry.asm", "helpers.asm"]);
        assert_eq!(names(&set.c), vec!["top.c", "kernel.c", "vga.c"]);
        assert!(set.asm.iter().all(|f| f.kind == SourceKind::Asm));
        assert!(set.c.iter().all(|f| f.kind == SourceKind::C));
        assert!(set.c.iter().all(|f| f.path.starts_with(root)));
    }

    #[test]
    fn test_scan_skips_hidden_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, ".git/hooks/sample.c");
        touch(root, "src/.cache/stale.c");
        touch(root, "src/.cache/deeper/stale.asm");
        touch(root, "src/main.c");
        // Hidden files are not filtered, only hidden directories.
        touch(root, "src/.hidden.c");

        let set = scan(root).unwrap();
        assert_eq!(names(&set.c), vec![".hidden.c", "main.c"]);
        assert!(set.asm.is_empty());
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = tempdir().unwrap();
        assert!(scan(&dir.path().join("absent")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_follow_directory_links() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/core/kernel.c");
        symlink(root, root.join("src/up")).unwrap();
        symlink(root.join("src/core"), root.join("src/alias")).unwrap();

        let set = scan(root).unwrap();
        assert_eq!(set.c.len(), 1);
        assert_eq!(set.c[0].path, root.join("src/core/kernel.c"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_keeps_linked_source_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "real/vga.c");
        std::os::unix::fs::symlink(root.join("real/vga.c"), root.join("vga_link.c")).unwrap();

        let set = scan(root).unwrap();
        assert_eq!(names(&set.c), vec!["vga_link.c", "vga.c"]);
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/a/.git")));
        assert!(!is_hidden(Path::new("/a/src")));
        assert!(!is_hidden(Path::new("/")));
    }
}
