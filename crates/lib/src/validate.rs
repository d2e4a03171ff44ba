//! Pre-flight checks for configurations upstream cannot build.

use thiserror::Error;

use crate::options::OptionSet;
use crate::settings::{CompilerKind, Settings};

/// A settings/options combination that is known not to build.
///
/// Raised before any source or build work starts; the user has to pick a
/// different configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfiguration {
  #[error("liquid-dsp does not support {0}")]
  UnsupportedCompiler(CompilerKind),

  #[error("Issue with liquid-dsp static and libtool")]
  StaticOnApple,
}

pub fn validate(settings: &Settings, options: &OptionSet) -> Result<(), InvalidConfiguration> {
  if settings.compiler.kind == CompilerKind::VisualStudio {
    return Err(InvalidConfiguration::UnsupportedCompiler(settings.compiler.kind));
  }
  // FIXME: static archives on Apple fail in upstream's makefile.in under libtool
  if settings.os.is_apple() && !options.shared {
    return Err(InvalidConfiguration::StaticOnApple);
  }
  Ok(())
}
