//! Model cache directory discovery
//!
//! Finds where fastembed should keep downloaded weights.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, SearchError};

/// Find the model cache directory with priority:
/// 1. Explicit path (from configuration or `--cache-dir`)
/// 2. TEXT_SEARCH_MODELS_PATH environment variable
/// 3. FASTEMBED_CACHE_DIR environment variable
/// 4. User home directory (~/.text-search/models)
///
/// The chosen directory is created if missing. Returns `None` when nothing
/// applies, in which case fastembed falls back to its own default.
pub fn find_cache_dir(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = resolve_cache_dir(explicit, |key| std::env::var_os(key)) else {
        return Ok(None);
    };
    ensure_dir(&path)?;
    Ok(Some(path))
}

fn resolve_cache_dir<F>(explicit: Option<&Path>, env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(path) = explicit {
        log::info!("Using model cache dir: {}", path.display());
        return Some(path.to_path_buf());
    }

    for key in ["TEXT_SEARCH_MODELS_PATH", "FASTEMBED_CACHE_DIR"] {
        if let Some(value) = env(key).filter(|v| !v.is_empty()) {
            let path = PathBuf::from(value);
            log::info!("Using {}: {}", key, path.display());
            return Some(path);
        }
    }

    env("HOME")
        .or_else(|| env("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".text-search").join("models"))
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(SearchError::invalid_path(format!(
            "model cache path is not a directory: {}",
            path.display()
        )));
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}
