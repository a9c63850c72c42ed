use crate::errors::{AppError, AppResult};
use crate::utils::path::ensure_parent_dir;
use std::path::Path;

/// Fail when `path` exists and `force` is not set; otherwise make sure the
/// parent directory exists.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "file '{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }
    ensure_parent_dir(path)?;
    Ok(())
}
