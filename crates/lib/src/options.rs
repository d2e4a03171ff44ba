//! Package options and their platform-dependent pruning.
//!
//! Two toggles exist: `shared` and `fPIC`. `fPIC` is dropped on Windows where
//! it has no meaning, and dropped when `shared` is requested since shared
//! objects are always position independent. Both rules are pure functions
//! from a requested `OptionSet` to an effective one.

use serde::{Deserialize, Serialize};

use crate::platform::os::Os;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSet {
  pub shared: bool,
  /// `None` once the option has been removed for this configuration.
  #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
  pub fpic: Option<bool>,
}

impl Default for OptionSet {
  fn default() -> Self {
    Self {
      shared: false,
      fpic: Some(true),
    }
  }
}

impl OptionSet {
  pub fn new(shared: bool, fpic: bool) -> Self {
    Self {
      shared,
      fpic: Some(fpic),
    }
  }

  /// Option configuration stage: removes fPIC on Windows.
  pub fn config_options(self, os: Os) -> Self {
    if os == Os::Windows {
      Self { fpic: None, ..self }
    } else {
      self
    }
  }

  /// Settings normalization stage: removes fPIC when building shared.
  pub fn configure(self) -> Self {
    if self.shared { Self { fpic: None, ..self } } else { self }
  }

  /// True when objects must be compiled with `-fPIC`.
  pub fn wants_pic(&self) -> bool {
    self.fpic == Some(true)
  }
}

/// Runs both pruning stages on the requested options.
pub fn derive_effective_options(os: Os, requested_shared: bool, requested_fpic: bool) -> OptionSet {
  OptionSet::new(requested_shared, requested_fpic).config_options(os).configure()
}
