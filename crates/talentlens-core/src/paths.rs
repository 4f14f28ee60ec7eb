//! Common filesystem paths used by talentlens.

use std::path::PathBuf;

/// Base directory for talentlens state (config, storage, log).
///
/// Defaults to `~/.talentlens`, but can be overridden via `TALENTLENS_DIR`
/// for testing or multi-profile setups.
pub fn talentlens_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TALENTLENS_DIR") {
        return PathBuf::from(dir);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".talentlens")
}

/// Path to the talentlens configuration file.
pub fn config_path() -> PathBuf {
    talentlens_dir().join("config.toml")
}

/// Path to the persisted key/value store (theme, search history).
pub fn storage_path() -> PathBuf {
    talentlens_dir().join("storage.json")
}

/// Path to the TUI log file.
pub fn log_path() -> PathBuf {
    talentlens_dir().join("talentlens.log")
}

#[doc(hidden)]
pub fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
