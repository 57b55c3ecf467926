//! Filesystem helpers shared by the `~/.ssh` and backup stores.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Create `dir` (and parents) and restrict it to the owner.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or its mode set.
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
        set_permissions(dir, 0o700)?;
    }
    Ok(())
}

/// Replace `path` with `content` through a temp file in the same directory,
/// so readers see either the old or the new file. The result has mode 600.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", path.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("write {}", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync {}", tmp.path().display()))?;
    set_permissions(tmp.path(), 0o600)?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Permission bits of `path`, `None` off Unix.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read.
#[cfg(unix)]
pub fn file_mode(path: &Path) -> Result<Option<u32>> {
    use std::os::unix::fs::PermissionsExt;
    let meta = std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(Some(meta.permissions().mode() & 0o777))
}

#[cfg(not(unix))]
pub fn file_mode(_path: &Path) -> Result<Option<u32>> {
    Ok(None)
}

#[cfg(unix)]
pub fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("set permissions on {}", path.display()))
}

#[cfg(not(unix))]
pub fn set_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
