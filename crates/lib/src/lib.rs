//! liquidpkg-lib: packaging recipe for the liquid-dsp library
//!
//! This crate provides the recipe that turns a liquid-dsp source release into
//! a binary package:
//! - `Recipe`: lifecycle callbacks (options, validation, source, build, package)
//! - `OptionSet` / `Settings`: the typed configuration the recipe is driven by
//! - `CommandRunner`: the single primitive all external tools go through
//! - `PackageInfo`: the linkage metadata published for consumers

pub mod autotools;
pub mod consts;
pub mod execute;
pub mod fetch;
pub mod options;
pub mod package;
pub mod platform;
pub mod recipe;
pub mod requirements;
pub mod settings;
pub mod sources;
pub mod target;
pub mod validate;

#[cfg(test)]
pub mod util;
