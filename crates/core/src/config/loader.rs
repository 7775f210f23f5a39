//! Config path resolution and file access
//!
//! Everything lives under one base directory: `FXRS_HOME` when set,
//! otherwise the parent of the directory holding the host executable that
//! loaded the plugin (`<base>/bin/<host>`). Hosts that keep the plugin
//! elsewhere should set `FXRS_HOME`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ConfigError, ConfigResult};

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "FXRS_HOME";

fn resolve_base_dir(home: Option<OsString>, exe: &Path) -> ConfigResult<PathBuf> {
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    // Navigate: <host> -> bin -> <base>
    exe.parent()
        .and_then(Path::parent)
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the fxrs base directory
///
/// Without `FXRS_HOME` this is derived from the running executable, not
/// from the plugin library.
pub fn fxrs_base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;
    resolve_base_dir(std::env::var_os(HOME_ENV), &exe)
}

/// Returns the base configs directory.
///
/// Path: `<base>/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    Ok(fxrs_base_dir()?.join("configs"))
}

/// Path of a resource's config file under `base`
///
/// Path: `<base>/configs/resources/{name}/{name}.toml`
pub fn resource_config_path_in(base: &Path, name: &str) -> PathBuf {
    base.join("configs")
        .join("resources")
        .join(name)
        .join(format!("{}.toml", name))
}

/// Returns the path for a resource's config file
pub fn resource_config_path(name: &str) -> ConfigResult<PathBuf> {
    Ok(resource_config_path_in(&fxrs_base_dir()?, name))
}

/// Path of the core config under `base`
pub fn core_config_path_in(base: &Path) -> PathBuf {
    base.join("configs").join("core.toml")
}

/// Returns the core framework config path.
///
/// Path: `<base>/configs/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(core_config_path_in(&fxrs_base_dir()?))
}

/// Read a TOML file, writing `T::default()` there first if it is missing
pub(crate) fn load_or_create<T>(path: &Path) -> ConfigResult<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    if path.exists() {
        let config = read_toml(path)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    } else {
        let default = T::default();
        write_toml(path, &default)?;
        tracing::info!("Created default config at {:?}", path);
        Ok(default)
    }
}

pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Write `value` as TOML, creating parent directories
pub(crate) fn write_toml<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    tracing::debug!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_overrides_binary_location() {
        let exe = Path::new("/srv/fx/bin/fxserver");

        assert_eq!(
            resolve_base_dir(Some("/opt/fxrs".into()), exe).unwrap(),
            PathBuf::from("/opt/fxrs")
        );
        assert_eq!(
            resolve_base_dir(None, exe).unwrap(),
            PathBuf::from("/srv/fx")
        );
        // Empty variable counts as unset
        assert_eq!(
            resolve_base_dir(Some("".into()), exe).unwrap(),
            PathBuf::from("/srv/fx")
        );
    }

    #[test]
    fn test_unset_home_follows_host_executable() {
        let exe = std::env::current_exe().unwrap();
        let expected = exe.parent().and_then(Path::parent).map(PathBuf::from);

        assert_eq!(resolve_base_dir(None, &exe).ok(), expected);
    }

    #[test]
    fn test_root_binary_has_no_base() {
        assert!(matches!(
            resolve_base_dir(None, Path::new("/fxrs.so")),
            Err(ConfigError::NoConfigDirectory)
        ));
    }

    #[test]
    fn test_resource_config_path_format() {
        let path = resource_config_path_in(Path::new("/srv/fx"), "garage");
        assert_eq!(
            path,
            PathBuf::from("/srv/fx/configs/resources/garage/garage.toml")
        );
        assert!(core_config_path_in(Path::new("/srv/fx")).ends_with("configs/core.toml"));
    }
}
