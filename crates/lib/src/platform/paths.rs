use crate::consts::{APP_NAME, CACHE_DIR_ENV};
use std::path::PathBuf;

/// Returns the user's home directory, falling back to the temp dir when unset
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  std::env::var("USERPROFILE")
    .map(PathBuf::from)
    .unwrap_or_else(|_| std::env::temp_dir())
}

/// Returns the user's home directory, falling back to the temp dir when unset
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var("HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| std::env::temp_dir())
}

/// Returns the directory for cache files for the application
///
/// `LIQUIDPKG_CACHE_DIR` takes precedence over the platform default.
#[cfg(windows)]
pub fn cache_dir() -> PathBuf {
  if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
    return PathBuf::from(dir);
  }
  std::env::var("LOCALAPPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir())
    .join(APP_NAME)
    .join("Cache")
}

/// Returns the directory for cache files for the application
///
/// `LIQUIDPKG_CACHE_DIR` takes precedence over `XDG_CACHE_HOME`.
#[cfg(not(windows))]
pub fn cache_dir() -> PathBuf {
  if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
    return PathBuf::from(dir);
  }
  let cache_home = std::env::var("XDG_CACHE_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".cache"));
  cache_home.join(APP_NAME)
}

/// Work directory for one package version: `<cache>/<name>/<version>`
pub fn work_dir(name: &str, version: &str) -> PathBuf {
  cache_dir().join(name).join(version)
}

/// Directory downloaded archives are cached in, shared across versions
pub fn downloads_dir() -> PathBuf {
  cache_dir().join("downloads")
}

#[cfg(test)]
#[cfg(not(windows))]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn explicit_cache_dir_takes_precedence() {
    temp_env::with_vars(
      [
        (CACHE_DIR_ENV, Some("/custom/cache")),
        ("XDG_CACHE_HOME", Some("/xdg/cache")),
      ],
      || {
        assert_eq!(cache_dir(), PathBuf::from("/custom/cache"));
        assert_eq!(
          work_dir("liquid-dsp", "1.3.2"),
          PathBuf::from("/custom/cache/liquid-dsp/1.3.2")
        );
      },
    );
  }

  #[test]
  #[serial]
  fn xdg_fallback_to_home_directories() {
    temp_env::with_vars(
      [
        (CACHE_DIR_ENV, None::<&str>),
        ("XDG_CACHE_HOME", None::<&str>),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(cache_dir(), PathBuf::from("/home/user/.cache").join(APP_NAME));
        assert_eq!(downloads_dir(), PathBuf::from("/home/user/.cache/liquidpkg/downloads"));
      },
    );
  }
}
