use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

use crate::store::SameSite;

pub const DEFAULT_STORAGE_KEY: &str = "utm_data";
pub const DEFAULT_TTL_DAYS: u32 = 30;
pub const DEFAULT_COOKIE_PATH: &str = "/";
pub const LOG_ENV_VAR: &str = "TOUCHPOINT_LOG";

/// Persistence parameters of the visit ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub storage_key: String,
    pub ttl_days: u32,
    pub cookie_path: String,
    pub same_site: SameSite,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ttl_days: DEFAULT_TTL_DAYS,
            cookie_path: DEFAULT_COOKIE_PATH.to_string(),
            same_site: SameSite::Lax,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            bail!("storage_key must not be empty");
        }
        if self.storage_key.contains([';', '=', ' ']) {
            bail!(
                "storage_key must not contain `;`, `=` or spaces: {}",
                self.storage_key
            );
        }
        if self.ttl_days == 0 {
            bail!("ttl_days must be greater than zero");
        }
        if !self.cookie_path.starts_with('/') {
            bail!("cookie_path must start with `/`: {}", self.cookie_path);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    pub home_dir: PathBuf,
    pub cwd: PathBuf,
    pub store_path: PathBuf,
}

pub fn resolve_runtime_paths(
    home_dir: &Path,
    cwd: &Path,
    store_override: Option<&Path>,
) -> Result<RuntimePaths> {
    if !home_dir.is_absolute() {
        bail!("home_dir must be absolute: {}", home_dir.display());
    }
    if !cwd.is_absolute() {
        bail!("cwd must be absolute: {}", cwd.display());
    }

    let home_dir = normalize_lexical(home_dir);
    let cwd = normalize_lexical(cwd);
    let store_path = match store_override {
        Some(path) => resolve_user_path(path, &home_dir, &cwd)?,
        None => home_dir.join(".touchpoint").join("store.sqlite"),
    };

    Ok(RuntimePaths {
        home_dir,
        cwd,
        store_path: normalize_lexical(&store_path),
    })
}

fn resolve_user_path(path: &Path, home_dir: &Path, cwd: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path, home_dir)?;
    let resolved = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    Ok(normalize_lexical(&resolved))
}

fn expand_tilde(path: &Path, home_dir: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let mut expanded = home_dir.to_path_buf();
            for component in components {
                expanded.push(component.as_os_str());
            }
            Ok(expanded)
        }
        Some(Component::Normal(first))
            if first
                .to_str()
                .is_some_and(|segment| segment.starts_with('~')) =>
        {
            bail!(
                "unsupported home expansion syntax (only `~` and `~/...` are supported): {}",
                path.display()
            )
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    normalized
}
