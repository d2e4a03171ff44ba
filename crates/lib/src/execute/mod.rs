//! External tool execution.
//!
//! Every tool the recipe runs (autotools regenerators, configure, make) goes
//! through [`CommandRunner`], so the fatal-on-nonzero contract is enforced in
//! one place and tests can swap in a recording runner.

pub mod cmd;
pub mod types;

pub use cmd::{CommandRunner, ProcessRunner, ScopedDir};
pub use types::{ExecuteError, Invocation, output_tail};
