//! Shard file writer.
//!
//! Shard `i` of `name.ext` is written to `name.ext.i`, in shard order, data
//! shards first.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use splinter_engine::ShardSet;
use tracing::info;

/// File name of shard `index` of `file_name`.
pub fn shard_file_name(file_name: &OsStr, index: usize) -> OsString {
    let mut name = file_name.to_os_string();
    name.push(format!(".{index}"));
    name
}

/// Write every shard of `set` next to `input`, or into `out_dir` if given.
///
/// Returns the written paths in shard order.
pub fn write_shards(set: &ShardSet, input: &Path, out_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let file_name = input
        .file_name()
        .with_context(|| format!("input path {} has no file name", input.display()))?;
    let dir = match out_dir {
        Some(dir) => dir,
        None => input.parent().unwrap_or(Path::new("")),
    };

    let mut written = Vec::with_capacity(set.len());
    for shard in set.iter() {
        let path = dir.join(shard_file_name(file_name, shard.index as usize));
        info!(path = %path.display(), index = shard.index, bytes = shard.data.len(), "writing shard");
        std::fs::write(&path, shard.data)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
