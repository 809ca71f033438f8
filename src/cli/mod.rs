pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DateRangeArgs};
pub use commands::run;
