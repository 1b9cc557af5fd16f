//! Source to object path mapping.
//!
//! The object path depends only on the source's file name and kind, never on
//! its directory: `src/driver/vga.c` becomes `<out>/vga.c.o`. Two sources
//! with the same file name in different directories therefore share one
//! object path. The mapping keeps that behavior; [`collisions`] lets the
//! caller report it.

use crate::scan::SourceFile;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Object path for `source` under `output_dir`. Pure; creates nothing.
pub fn object_path(output_dir: &Path, source: &SourceFile) -> PathBuf {
    let mut name = source
        .path
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(source.kind.object_suffix());
    output_dir.join(name)
}

/// Groups of sources that map to the same object path, in first-seen order.
pub fn collisions<'a>(
    output_dir: &Path,
    sources: impl IntoIterator<Item = &'a SourceFile>,
) -> Vec<(PathBuf, Vec<&'a SourceFile>)> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut groups: HashMap<PathBuf, Vec<&'a SourceFile>> = HashMap::new();
    for source in sources {
        let object = object_path(output_dir, source);
        let group = groups.entry(object.clone()).or_default();
        if group.is_empty() {
            order.push(object);
        }
        group.push(source);
    }

    order
        .into_iter()
        .filter_map(|object| {
            let group = groups.remove(&object)?;
            (group.len() > 1).then_some((object, group))
        })
        .collect()
}
