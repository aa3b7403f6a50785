pub mod config;
pub mod logging;

pub mod arch;
pub mod checksum;
pub mod disk;
pub mod error;
pub mod fetch;
pub mod flow;
pub mod installer;
pub mod net;
pub mod release;
pub mod retry;
pub mod staging;
