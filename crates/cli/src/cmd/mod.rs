mod create;
mod info;
mod inspect;
mod package_info;

pub use create::{CreateArgs, cmd_create};
pub use info::cmd_info;
pub use inspect::cmd_inspect;
pub use package_info::cmd_package_info;
