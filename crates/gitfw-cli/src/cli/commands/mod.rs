//! CLI command handlers. Each command is in its own file.

mod checksum;
mod install;
mod locate;

pub use checksum::run_checksum;
pub use install::run_install;
pub use locate::run_locate;
