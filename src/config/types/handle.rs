//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so
//! long-running hosts can swap in an edited `pagemeta.toml` without
//! interrupting in-flight resolutions.

use crate::config::{ConfigError, MetaConfig};
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock, Mutex};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<MetaConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(MetaConfig::default()));

/// Raw content of the last loaded config file, for change detection.
static CONFIG_CONTENT: Mutex<Option<String>> = Mutex::new(None);

#[inline]
pub fn cfg() -> Arc<MetaConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: MetaConfig) -> Arc<MetaConfig> {
    if config.config_path.exists()
        && let Ok(content) = std::fs::read_to_string(&config.config_path)
    {
        *CONFIG_CONTENT.lock().expect("config content lock") = Some(content);
    }

    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

/// Reload config from disk if content changed.
///
/// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
pub fn reload_config() -> Result<bool, ConfigError> {
    let current = cfg();
    let path = &current.config_path;

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(path.clone(), e))?;

    {
        let last = CONFIG_CONTENT.lock().expect("config content lock");
        if last.as_deref() == Some(content.as_str()) {
            return Ok(false);
        }
    }

    let new_config = MetaConfig::load(path)?;
    CONFIG.store(Arc::new(new_config));
    *CONFIG_CONTENT.lock().expect("config content lock") = Some(content);

    Ok(true)
}
