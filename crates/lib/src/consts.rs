//! Recipe-wide constants.

pub const APP_NAME: &str = "liquidpkg";

/// Name of the packaged upstream project.
pub const PACKAGE_NAME: &str = "liquid-dsp";
pub const PACKAGE_DESCRIPTION: &str = "Digital signal processing library for software-defined radios.";
pub const PACKAGE_LICENSE: &str = "MIT";
pub const PACKAGE_HOMEPAGE: &str = "https://liquidsdr.org";
pub const PACKAGE_TOPICS: &[&str] = &["dsp", "sdr", "liquid-dsp"];

/// Default upstream release packaged when no version is requested.
pub const DEFAULT_VERSION: &str = "1.3.2";

/// Directory (relative to the work dir) the upstream archive is extracted into.
pub const SOURCE_SUBFOLDER: &str = "source_subfolder";

/// Link name consumers pass to the linker (`-lliquid`).
pub const LIB_NAME: &str = "liquid";

/// Math library needed on platforms whose C runtime does not bundle libm.
pub const MATH_LIB: &str = "m";

pub const LIBTOOL_REQUIREMENT: (&str, &str) = ("libtool", "2.4.6");
pub const MSYS2_REQUIREMENT: (&str, &str) = ("msys2", "cci.latest");

/// Environment variable overriding the bash used for `win_bash` commands.
pub const BASH_PATH_ENV: &str = "LIQUIDPKG_BASH_PATH";

/// Environment variable overriding the default work directory root.
pub const CACHE_DIR_ENV: &str = "LIQUIDPKG_CACHE_DIR";

/// File written at the package root describing how to link the package.
pub const PACKAGE_INFO_FILE: &str = "package_info.json";
